//! 传感器访问服务。

use crate::page::{Paged, collect_page};
use crate::validation::{normalize_optional, normalize_required, normalize_text};
use crate::AccessError;
use domain::{Operation, Principal, authorize};
use iot_storage::{NewSensor, Page, SensorFilter, SensorRecord, SensorStore, SensorUpdate};
use iot_telemetry::{
    record_forbidden, record_not_found, record_sensor_created, record_sensor_deleted,
    record_sensor_updated,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// 传感器创建输入（未校验）。
///
/// 没有所有者字段，所有者总是发起创建的主体。
#[derive(Debug, Clone)]
pub struct SensorDraft {
    pub name: String,
    pub measurement: String,
    pub location: String,
    pub description: Option<String>,
}

/// 传感器部分更新输入（未校验），只携带调用方显式给出的字段。
#[derive(Debug, Clone, Default)]
pub struct SensorPatch {
    pub name: Option<String>,
    pub measurement: Option<String>,
    pub location: Option<String>,
    pub description: Option<Option<String>>,
}

impl SensorDraft {
    fn validate(self, owner_id: i64) -> Result<NewSensor, AccessError> {
        Ok(NewSensor {
            name: normalize_required(self.name, "name")?,
            measurement: normalize_required(self.measurement, "measurement")?,
            location: normalize_required(self.location, "location")?,
            description: self
                .description
                .map(|value| normalize_text(value, "description"))
                .transpose()?,
            owner_id,
        })
    }
}

impl SensorPatch {
    fn validate(self) -> Result<SensorUpdate, AccessError> {
        let description = match self.description {
            Some(Some(value)) => Some(Some(normalize_text(value, "description")?)),
            Some(None) => Some(None),
            None => None,
        };
        Ok(SensorUpdate {
            name: normalize_optional(self.name, "name")?,
            measurement: normalize_optional(self.measurement, "measurement")?,
            location: normalize_optional(self.location, "location")?,
            description,
        })
    }
}

/// 超级管理员看到全部传感器，其余主体只看到自己的。
fn scope_for(principal: &Principal) -> SensorFilter {
    if principal.is_superuser {
        SensorFilter::all()
    } else {
        SensorFilter::owned_by(principal.user_id)
    }
}

/// 加载传感器并校验归属：先判存在（NotFound），再判归属（Forbidden）。
///
/// 读数服务复用同一逻辑，读数的归属即所属传感器的归属。
pub(crate) async fn resolve_sensor(
    sensors: &dyn SensorStore,
    principal: &Principal,
    sensor_id: i64,
    operation: Operation,
) -> Result<SensorRecord, AccessError> {
    let Some(sensor) = sensors.find_sensor(sensor_id).await? else {
        record_not_found();
        return Err(AccessError::NotFound("sensor"));
    };
    if !authorize(principal, sensor.owner_id, operation).is_allowed() {
        record_forbidden();
        warn!(
            target: "iot.access",
            user_id = principal.user_id,
            sensor_id,
            owner_id = sensor.owner_id,
            ?operation,
            "sensor access denied"
        );
        return Err(AccessError::Forbidden);
    }
    Ok(sensor)
}

/// 传感器 CRUD 编排。
pub struct SensorService {
    sensors: Arc<dyn SensorStore>,
}

impl SensorService {
    pub fn new(sensors: Arc<dyn SensorStore>) -> Self {
        Self { sensors }
    }

    /// 按主体作用域分页列出传感器，`total` 不受分页窗口影响。
    pub async fn list(
        &self,
        principal: &Principal,
        page: Page,
    ) -> Result<Paged<SensorRecord>, AccessError> {
        let filter = scope_for(principal);
        collect_page(
            self.sensors.count_sensors(filter),
            self.sensors.list_sensors(filter, page),
        )
        .await
    }

    pub async fn get(
        &self,
        principal: &Principal,
        sensor_id: i64,
    ) -> Result<SensorRecord, AccessError> {
        resolve_sensor(self.sensors.as_ref(), principal, sensor_id, Operation::Read).await
    }

    /// 创建传感器，所有者固定为当前主体。
    pub async fn create(
        &self,
        principal: &Principal,
        draft: SensorDraft,
    ) -> Result<SensorRecord, AccessError> {
        let record = draft.validate(principal.user_id)?;
        let created = self.sensors.create_sensor(record).await?;
        record_sensor_created();
        debug!(
            target: "iot.access",
            sensor_id = created.sensor_id,
            owner_id = created.owner_id,
            "sensor created"
        );
        Ok(created)
    }

    /// 部分更新传感器；所有者不可修改。返回存储中更新后的记录。
    pub async fn update(
        &self,
        principal: &Principal,
        sensor_id: i64,
        patch: SensorPatch,
    ) -> Result<SensorRecord, AccessError> {
        let update = patch.validate()?;
        let current =
            resolve_sensor(self.sensors.as_ref(), principal, sensor_id, Operation::Write).await?;
        if update.is_empty() {
            return Ok(current);
        }
        let Some(updated) = self.sensors.update_sensor(sensor_id, update).await? else {
            // 校验之后、写入之前被并发删除
            record_not_found();
            return Err(AccessError::NotFound("sensor"));
        };
        record_sensor_updated();
        debug!(target: "iot.access", sensor_id, "sensor updated");
        Ok(updated)
    }

    /// 删除传感器。读数不在这里清理，由存储层的级联约束负责。
    pub async fn delete(&self, principal: &Principal, sensor_id: i64) -> Result<(), AccessError> {
        resolve_sensor(self.sensors.as_ref(), principal, sensor_id, Operation::Write).await?;
        if !self.sensors.delete_sensor(sensor_id).await? {
            record_not_found();
            return Err(AccessError::NotFound("sensor"));
        }
        record_sensor_deleted();
        debug!(target: "iot.access", sensor_id, "sensor deleted");
        Ok(())
    }
}
