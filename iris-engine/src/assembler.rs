use iris_core::document::{ConstraintDocument, SCHEMA, UNITS};
use tracing::{debug, info};

use crate::builder::DocumentBuilder;
use crate::errors::EngineError;
use crate::params::{MIN_BLADES, MechanismParams};

/// 校验并冻结构建结果。
///
/// 叶片数量、标识唯一性、前向引用和 `$` 参数引用任一不满足都会中止，
/// 不返回部分文档。外部求解器对畸形文档的报错不可依赖，因此必须在交付前拦截。
pub fn assemble(
    builder: DocumentBuilder,
    params: &MechanismParams,
) -> Result<ConstraintDocument, EngineError> {
    if params.blade_count() < MIN_BLADES {
        return Err(EngineError::InvalidBladeCount {
            requested: params.blade_count(),
            minimum: MIN_BLADES,
        });
    }

    let (parameters, entities, constraints) = builder.into_parts();
    debug!(
        parameters = parameters.len(),
        entities = entities.len(),
        constraints = constraints.len(),
        "校验约束文档"
    );

    let document = ConstraintDocument::new(SCHEMA, UNITS, parameters, entities, constraints)?;
    info!(
        blade_count = params.blade_count(),
        blade_angle = params.blade_angle(),
        entities = document.entities().len(),
        constraints = document.constraints().len(),
        "约束文档组装完成"
    );
    Ok(document)
}
