//! Vehicle maintenance domain model.
//!
//! # Responsibility
//! - Define vehicles plus their maintenance and odometer child records.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another record.
//! - Maintenance costs are integer cents; absent cost means "not tracked",
//!   and absent contributes zero to rollups.

use crate::model::{require_non_negative, require_non_negative_opt, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a tracked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// Road-worthy and in regular use.
    Active,
    /// Currently at a shop for service.
    InShop,
    /// No longer owned or driven.
    Retired,
}

fn vehicle_status_to_db(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::Active => "active",
        VehicleStatus::InShop => "in_shop",
        VehicleStatus::Retired => "retired",
    }
}

fn parse_vehicle_status(value: &str) -> Option<VehicleStatus> {
    match value {
        "active" => Some(VehicleStatus::Active),
        "in_shop" => Some(VehicleStatus::InShop),
        "retired" => Some(VehicleStatus::Retired),
        _ => None,
    }
}

/// A tracked vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub uuid: RecordId,
    /// Display name, e.g. "Daily driver".
    pub name: String,
    pub make: String,
    pub model: String,
    pub model_year: Option<i64>,
    pub license_plate: Option<String>,
    pub status: VehicleStatus,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

impl Vehicle {
    /// Creates an active vehicle with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            make: make.into(),
            model: model.into(),
            model_year: None,
            license_plate: None,
            status: VehicleStatus::Active,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for Vehicle {
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "name",
        "make",
        "model",
        "model_year",
        "license_plate",
        "status",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "vehicle", "name")?;
        require_text(&self.make, "vehicle", "make")?;
        require_text(&self.model, "vehicle", "model")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::text(&self.make),
            codec::text(&self.model),
            codec::opt_int(self.model_year),
            codec::opt_text(self.license_plate.as_deref()),
            codec::text(vehicle_status_to_db(self.status)),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let status_text: String = row.get("status")?;
        let status = parse_vehicle_status(&status_text).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "invalid vehicle status `{status_text}` in vehicles.status"
            ))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            make: row.get("make")?,
            model: row.get("model")?,
            model_year: row.get("model_year")?,
            license_plate: row.get("license_plate")?,
            status,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// One service visit for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub uuid: RecordId,
    /// Parent vehicle. May dangle; rollups then render "unknown vehicle".
    pub vehicle_uuid: RecordId,
    /// e.g. "Oil change", "Brake pads".
    pub service_type: String,
    pub service_date: NaiveDate,
    pub odometer: Option<i64>,
    /// Integer cents; `None` when the cost was not recorded.
    pub cost_cents: Option<i64>,
    pub shop: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl MaintenanceRecord {
    pub fn new(
        vehicle_uuid: RecordId,
        service_type: impl Into<String>,
        service_date: NaiveDate,
        now_ms: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            vehicle_uuid,
            service_type: service_type.into(),
            service_date,
            odometer: None,
            cost_cents: None,
            shop: None,
            notes: None,
            created_at: now_ms,
        }
    }
}

impl Record for MaintenanceRecord {
    const TABLE: &'static str = "maintenance_records";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "vehicle_uuid",
        "service_type",
        "service_date",
        "odometer",
        "cost_cents",
        "shop",
        "notes",
        "created_at",
    ];
    const PARENT_COLUMN: Option<&'static str> = Some("vehicle_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.service_type, "maintenance_record", "service_type")?;
        require_non_negative_opt(self.odometer, "maintenance_record", "odometer")?;
        require_non_negative_opt(self.cost_cents, "maintenance_record", "cost_cents")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.vehicle_uuid),
            codec::text(&self.service_type),
            codec::date(self.service_date),
            codec::opt_int(self.odometer),
            codec::opt_int(self.cost_cents),
            codec::opt_text(self.shop.as_deref()),
            codec::opt_text(self.notes.as_deref()),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            vehicle_uuid: codec::parse_id(row, "vehicle_uuid")?,
            service_type: row.get("service_type")?,
            service_date: codec::parse_date(row, "service_date")?,
            odometer: row.get("odometer")?,
            cost_cents: row.get("cost_cents")?,
            shop: row.get("shop")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A dated odometer reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OdometerLog {
    pub uuid: RecordId,
    pub vehicle_uuid: RecordId,
    pub reading_date: NaiveDate,
    pub reading: i64,
}

impl OdometerLog {
    pub fn new(vehicle_uuid: RecordId, reading_date: NaiveDate, reading: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            vehicle_uuid,
            reading_date,
            reading,
        }
    }
}

impl Record for OdometerLog {
    const TABLE: &'static str = "odometer_logs";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "vehicle_uuid", "reading_date", "reading"];
    const PARENT_COLUMN: Option<&'static str> = Some("vehicle_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative(self.reading, "odometer_log", "reading")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.vehicle_uuid),
            codec::date(self.reading_date),
            codec::int(self.reading),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            vehicle_uuid: codec::parse_id(row, "vehicle_uuid")?,
            reading_date: codec::parse_date(row, "reading_date")?,
            reading: row.get("reading")?,
        })
    }
}
