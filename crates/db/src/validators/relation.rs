//! Validators for the four relation entities.

use pme_core::validation::{check_non_negative, check_positive, check_short_label};

use crate::models::project_equipment_relation::{
    CreateProjectEquipmentRelation, UpdateProjectEquipmentRelation,
};
use crate::models::task_equipment_relation::{
    CreateTaskEquipmentRelation, UpdateTaskEquipmentRelation,
};
use crate::models::task_project_relation::{
    CreateTaskProjectRelation, UpdateTaskProjectRelation,
};
use crate::models::task_user_relation::{CreateTaskUserRelation, UpdateTaskUserRelation};

const RELATION_TYPE_FIELD: &str = "関連種別";
const ROLE_TYPE_FIELD: &str = "役割";
const USAGE_TYPE_FIELD: &str = "用途";
const PLANNED_HOURS_FIELD: &str = "予定工数";
const ACTUAL_HOURS_FIELD: &str = "実績工数";
const QUANTITY_FIELD: &str = "数量";
const SORT_ORDER_FIELD: &str = "表示順";

pub fn validate_create_task_project(input: &CreateTaskProjectRelation) -> Result<(), String> {
    check_short_label(input.relation_type.as_deref(), RELATION_TYPE_FIELD)?;
    check_non_negative(input.sort_order, SORT_ORDER_FIELD)
}

pub fn validate_update_task_project(input: &UpdateTaskProjectRelation) -> Result<(), String> {
    check_short_label(input.relation_type.as_deref(), RELATION_TYPE_FIELD)?;
    check_non_negative(input.sort_order, SORT_ORDER_FIELD)
}

fn check_hours(planned: Option<f64>, actual: Option<f64>) -> Result<(), String> {
    check_non_negative(planned, PLANNED_HOURS_FIELD)?;
    check_non_negative(actual, ACTUAL_HOURS_FIELD)
}

pub fn validate_create_task_user(input: &CreateTaskUserRelation) -> Result<(), String> {
    check_short_label(input.role_type.as_deref(), ROLE_TYPE_FIELD)?;
    check_hours(input.planned_hours, input.actual_hours)
}

pub fn validate_update_task_user(input: &UpdateTaskUserRelation) -> Result<(), String> {
    check_short_label(input.role_type.as_deref(), ROLE_TYPE_FIELD)?;
    check_hours(input.planned_hours, input.actual_hours)
}

pub fn validate_create_task_equipment(input: &CreateTaskEquipmentRelation) -> Result<(), String> {
    check_short_label(input.usage_type.as_deref(), USAGE_TYPE_FIELD)?;
    check_positive(input.quantity, QUANTITY_FIELD)?;
    check_non_negative(input.sort_order, SORT_ORDER_FIELD)
}

pub fn validate_update_task_equipment(input: &UpdateTaskEquipmentRelation) -> Result<(), String> {
    check_short_label(input.usage_type.as_deref(), USAGE_TYPE_FIELD)?;
    check_positive(input.quantity, QUANTITY_FIELD)?;
    check_non_negative(input.sort_order, SORT_ORDER_FIELD)
}

pub fn validate_create_project_equipment(
    input: &CreateProjectEquipmentRelation,
) -> Result<(), String> {
    check_short_label(input.usage_type.as_deref(), USAGE_TYPE_FIELD)?;
    check_positive(input.quantity, QUANTITY_FIELD)
}

pub fn validate_update_project_equipment(
    input: &UpdateProjectEquipmentRelation,
) -> Result<(), String> {
    check_short_label(input.usage_type.as_deref(), USAGE_TYPE_FIELD)?;
    check_positive(input.quantity, QUANTITY_FIELD)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn negative_hours_are_rejected() {
        let input = CreateTaskUserRelation {
            task_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role_type: None,
            planned_hours: Some(-0.5),
            actual_hours: None,
        };
        assert_eq!(
            validate_create_task_user(&input).unwrap_err(),
            "予定工数は0以上で入力してください"
        );
    }

    #[test]
    fn nan_hours_are_rejected() {
        let input = UpdateTaskUserRelation {
            actual_hours: Some(f64::NAN),
            ..Default::default()
        };
        assert!(validate_update_task_user(&input).is_err());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let input = CreateTaskEquipmentRelation {
            task_id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            usage_type: None,
            quantity: Some(0),
            sort_order: None,
        };
        assert_eq!(
            validate_create_task_equipment(&input).unwrap_err(),
            "数量は1以上で入力してください"
        );
    }

    #[test]
    fn overlong_relation_type_is_rejected() {
        let input = UpdateTaskProjectRelation {
            relation_type: Some("x".repeat(51)),
            sort_order: None,
        };
        assert_eq!(
            validate_update_task_project(&input).unwrap_err(),
            "関連種別は50文字以内で入力してください"
        );
    }

    #[test]
    fn defaults_pass() {
        let input = CreateProjectEquipmentRelation {
            project_id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            usage_type: None,
            quantity: None,
        };
        assert!(validate_create_project_equipment(&input).is_ok());
    }
}
