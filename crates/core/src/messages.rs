//! Localized user-facing messages, one set per entity.
//!
//! Every set is derived from the entity's display label so the wording stays
//! uniform across entities.

/// User-facing strings for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMessages {
    pub label: &'static str,
    pub not_found: &'static str,
    pub id_required: &'static str,
    pub list_failed: &'static str,
    pub fetch_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
    pub already_exists: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

macro_rules! entity_messages {
    ($(#[$meta:meta])* $name:ident = $label:literal) => {
        $(#[$meta])*
        pub const $name: EntityMessages = EntityMessages {
            label: $label,
            not_found: concat!($label, "が見つかりません"),
            id_required: concat!($label, "IDが指定されていません"),
            list_failed: concat!($label, "一覧取得に失敗しました"),
            fetch_failed: concat!($label, "取得に失敗しました"),
            create_failed: concat!($label, "作成に失敗しました"),
            update_failed: concat!($label, "更新に失敗しました"),
            delete_failed: concat!($label, "削除に失敗しました"),
            already_exists: concat!($label, "は既に登録されています"),
            created: concat!($label, "を作成しました"),
            updated: concat!($label, "を更新しました"),
            deleted: concat!($label, "を削除しました"),
        };
    };
}

entity_messages!(PROJECT = "プロジェクト");
entity_messages!(USER = "ユーザー");
entity_messages!(TASK = "タスク");
entity_messages!(TASK_TYPE = "タスク種別");
entity_messages!(EQUIPMENT = "設備");
entity_messages!(TASK_PROJECT_RELATION = "タスク・プロジェクト関連");
entity_messages!(TASK_USER_RELATION = "タスク・担当者関連");
entity_messages!(TASK_EQUIPMENT_RELATION = "タスク・設備関連");
entity_messages!(PROJECT_EQUIPMENT_RELATION = "プロジェクト・設備関連");
