//! `SQLite` implementation of [`SecurityRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use catpoint_app::ports::SecurityRepository;
use catpoint_domain::error::{CatpointError, NotFoundError};
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::{Sensor, SensorType};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Sensor`].
struct Wrapper(Sensor);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Sensor> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let sensor_type: String = row.try_get("sensor_type")?;
        let active: bool = row.try_get("active")?;

        let id = SensorId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let sensor_type = SensorType::from_str(&sensor_type)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Sensor {
            id,
            name,
            sensor_type,
            active,
        }))
    }
}

fn decode<T>(value: &str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(|err| StorageError::Database(sqlx::Error::Decode(Box::new(err))))
}

const SELECT_ALARM: &str = "SELECT alarm_status FROM system_status WHERE id = 1";
const UPDATE_ALARM: &str = "UPDATE system_status SET alarm_status = ? WHERE id = 1";
const SELECT_ARMING: &str = "SELECT arming_status FROM system_status WHERE id = 1";
const UPDATE_ARMING: &str = "UPDATE system_status SET arming_status = ? WHERE id = 1";

const INSERT_SENSOR: &str = r"
    INSERT INTO sensors (id, name, sensor_type, active)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO NOTHING
";
const SELECT_SENSORS: &str = "SELECT * FROM sensors ORDER BY name, id";
const SELECT_SENSOR_BY_ID: &str = "SELECT * FROM sensors WHERE id = ?";
const UPDATE_SENSOR: &str =
    "UPDATE sensors SET name = ?, sensor_type = ?, active = ? WHERE id = ?";
const DELETE_SENSOR: &str = "DELETE FROM sensors WHERE id = ?";

/// `SQLite`-backed security repository.
///
/// Both statuses live in the single row of `system_status`; sensors live in
/// `sensors`.
#[derive(Clone)]
pub struct SqliteSecurityRepository {
    pool: SqlitePool,
}

impl SqliteSecurityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SecurityRepository for SqliteSecurityRepository {
    fn get_alarm_status(&self) -> impl Future<Output = Result<AlarmStatus, CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (status,): (String,) = sqlx::query_as(SELECT_ALARM)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(decode(&status)?)
        }
    }

    fn set_alarm_status(
        &self,
        status: AlarmStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE_ALARM)
                .bind(status.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn get_arming_status(
        &self,
    ) -> impl Future<Output = Result<ArmingStatus, CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (status,): (String,) = sqlx::query_as(SELECT_ARMING)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(decode(&status)?)
        }
    }

    fn set_arming_status(
        &self,
        status: ArmingStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE_ARMING)
                .bind(status.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn get_sensors(&self) -> impl Future<Output = Result<Vec<Sensor>, CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_SENSORS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_sensor(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_SENSOR_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn add_sensor(&self, sensor: Sensor) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_SENSOR)
                .bind(sensor.id.to_string())
                .bind(&sensor.name)
                .bind(sensor.sensor_type.as_str())
                .bind(sensor.active)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn remove_sensor(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_SENSOR)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn update_sensor(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE_SENSOR)
                .bind(&sensor.name)
                .bind(sensor.sensor_type.as_str())
                .bind(sensor.active)
                .bind(sensor.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Sensor",
                    id: sensor.id.to_string(),
                }
                .into());
            }
            Ok(())
        }
    }
}
