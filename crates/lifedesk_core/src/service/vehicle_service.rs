//! Vehicle maintenance use-case service.
//!
//! # Responsibility
//! - CRUD entry points for vehicles and their child records.
//! - Cost rollups and maintenance history views.
//!
//! # Invariants
//! - Deleting a vehicle removes its maintenance and odometer children.
//! - Absent maintenance costs contribute zero to rollups.
//! - History rows with a dangling vehicle reference keep `vehicle_name`
//!   empty instead of failing.

use crate::derive::{format_cents, matches_text, selector_matches, sum_amounts};
use crate::model::vehicle::{MaintenanceRecord, OdometerLog, Vehicle, VehicleStatus};
use crate::store::{Collection, RecordId, SqliteCollection, StoreResult};
use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;

/// Derived cost rollup for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleCostSummary {
    pub vehicle_uuid: RecordId,
    pub record_count: usize,
    pub total_cost_cents: i64,
    /// Pre-formatted dollars, e.g. "$74.99".
    pub total_cost_display: String,
    pub last_service_on: Option<NaiveDate>,
}

/// Maintenance row joined with its (possibly unknown) vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceWithVehicle {
    pub record: MaintenanceRecord,
    /// `None` when the parent vehicle no longer exists.
    pub vehicle_name: Option<String>,
}

/// Use-case facade for the vehicle module.
pub struct VehicleService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> VehicleService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn vehicles(&self) -> StoreResult<SqliteCollection<'_, Vehicle>> {
        SqliteCollection::try_new(self.conn)
    }

    fn maintenance(&self) -> StoreResult<SqliteCollection<'_, MaintenanceRecord>> {
        SqliteCollection::try_new(self.conn)
    }

    fn odometer(&self) -> StoreResult<SqliteCollection<'_, OdometerLog>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn add_vehicle(&self, vehicle: &Vehicle) -> StoreResult<RecordId> {
        self.vehicles()?.insert(vehicle)
    }

    /// Updates a vehicle in place, refreshing its modification stamp.
    pub fn update_vehicle(&self, vehicle: &mut Vehicle, now_ms: i64) -> StoreResult<()> {
        vehicle.updated_at = now_ms;
        self.vehicles()?.update(vehicle)
    }

    pub fn get_vehicle(&self, id: RecordId) -> StoreResult<Option<Vehicle>> {
        self.vehicles()?.get(id)
    }

    pub fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.vehicles()?.list()
    }

    pub fn log_maintenance(&self, record: &MaintenanceRecord) -> StoreResult<RecordId> {
        self.maintenance()?.insert(record)
    }

    pub fn log_odometer(&self, log: &OdometerLog) -> StoreResult<RecordId> {
        self.odometer()?.insert(log)
    }

    pub fn list_maintenance(&self, vehicle_uuid: RecordId) -> StoreResult<Vec<MaintenanceRecord>> {
        self.maintenance()?.list_children(vehicle_uuid)
    }

    /// Deletes a vehicle and cascades to its child records.
    pub fn delete_vehicle(&self, id: RecordId) -> StoreResult<()> {
        self.vehicles()?.delete(id)?;
        let removed_maintenance = self.maintenance()?.delete_children(id)?;
        let removed_odometer = self.odometer()?.delete_children(id)?;
        info!(
            "event=vehicle_delete module=vehicle status=ok vehicle={id} \
             maintenance_removed={removed_maintenance} odometer_removed={removed_odometer}"
        );
        Ok(())
    }

    /// Total spent on one vehicle. `None` when the vehicle is unknown.
    pub fn cost_summary(&self, vehicle_uuid: RecordId) -> StoreResult<Option<VehicleCostSummary>> {
        if self.vehicles()?.get(vehicle_uuid)?.is_none() {
            return Ok(None);
        }

        let records = self.maintenance()?.list_children(vehicle_uuid)?;
        let total_cost_cents = sum_amounts(records.iter().map(|record| record.cost_cents));
        let last_service_on = records.iter().map(|record| record.service_date).max();

        Ok(Some(VehicleCostSummary {
            vehicle_uuid,
            record_count: records.len(),
            total_cost_cents,
            total_cost_display: format_cents(total_cost_cents),
            last_service_on,
        }))
    }

    /// All maintenance rows joined with their vehicle names; dangling
    /// references come back with `vehicle_name: None`.
    pub fn maintenance_overview(&self) -> StoreResult<Vec<MaintenanceWithVehicle>> {
        let vehicles = self.vehicles()?.list()?;
        let records = self.maintenance()?.list()?;

        Ok(records
            .into_iter()
            .map(|record| {
                let vehicle_name = vehicles
                    .iter()
                    .find(|vehicle| vehicle.uuid == record.vehicle_uuid)
                    .map(|vehicle| vehicle.name.clone());
                MaintenanceWithVehicle {
                    record,
                    vehicle_name,
                }
            })
            .collect())
    }

    /// Most recent odometer reading by date for one vehicle.
    pub fn latest_odometer(&self, vehicle_uuid: RecordId) -> StoreResult<Option<OdometerLog>> {
        let logs = self.odometer()?.list_children(vehicle_uuid)?;
        Ok(logs.into_iter().max_by_key(|log| log.reading_date))
    }

    /// Text search over name/make/model, AND-composed with a status
    /// selector (`None` selects all).
    pub fn search_vehicles(
        &self,
        query: &str,
        status: Option<VehicleStatus>,
    ) -> StoreResult<Vec<Vehicle>> {
        let vehicles = self.vehicles()?.list()?;
        Ok(vehicles
            .into_iter()
            .filter(|vehicle| {
                matches_text(
                    query,
                    &[
                        Some(vehicle.name.as_str()),
                        Some(vehicle.make.as_str()),
                        Some(vehicle.model.as_str()),
                    ],
                ) && selector_matches(status.as_ref(), &vehicle.status)
            })
            .collect())
    }
}
