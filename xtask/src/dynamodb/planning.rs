//! Deploy planning (pure functions, no I/O).

use super::config::TableConfig;

/// Current table state as observed from AWS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
}

/// Table lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned deploy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    CreateTable { config: TableConfig },
    NoChanges { table_name: String },
}

/// Planned destroy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    DeleteTable { table_name: String },
    AlreadyGone { table_name: String },
}

/// Decide what a deploy has to do given the observed state.
pub fn calculate_deploy_plan(current: Option<&TableState>, config: &TableConfig) -> DeployPlan {
    match current {
        Some(_) => DeployPlan::NoChanges {
            table_name: config.table_name.clone(),
        },
        None => DeployPlan::CreateTable {
            config: config.clone(),
        },
    }
}

/// Decide what a destroy has to do given the observed state.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Human-readable deploy plan lines.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!(
                "+ table {} (partition key: {})",
                config.table_name, config.partition_key.name
            ),
            "+ billing mode: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("table {table_name} already exists")]
        }
    }
}

/// Human-readable destroy plan lines.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!("- table {table_name} (and all its data)")]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("table {table_name} does not exist")]
        }
    }
}
