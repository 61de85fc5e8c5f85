//! Workspaces: named projects with time-allocated tasks.
//!
//! Workspaces are read-only in this build; the dataset comes from
//! `crate::mock` until real project tracking exists.

use serde::{Deserialize, Serialize};

/// A task inside a workspace, with spent and allocated minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceTask {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Minutes already spent
    pub spent_minutes: u32,
    /// Minutes allocated
    pub allocated_minutes: u32,
}

impl WorkspaceTask {
    /// Fraction of the allocation spent (0.0 to 1.0).
    pub fn progress(&self) -> f64 {
        if self.allocated_minutes == 0 {
            0.0
        } else {
            (self.spent_minutes as f64 / self.allocated_minutes as f64).min(1.0)
        }
    }
}

/// A project grouping tasks with a time budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Total minutes spent across the project
    pub total_minutes: u32,
    /// Minutes allocated to the project
    pub allocated_minutes: u32,
    /// Tasks under this project
    pub tasks: Vec<WorkspaceTask>,
}

impl Workspace {
    /// Fraction of the project budget spent (0.0 to 1.0).
    pub fn progress(&self) -> f64 {
        if self.allocated_minutes == 0 {
            0.0
        } else {
            (self.total_minutes as f64 / self.allocated_minutes as f64).min(1.0)
        }
    }

    /// True when spent time exceeds the allocation.
    pub fn over_allocation(&self) -> bool {
        self.total_minutes > self.allocated_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_workspace() -> Workspace {
        Workspace {
            id: "1".to_string(),
            name: "Project".to_string(),
            total_minutes: 480,
            allocated_minutes: 360,
            tasks: vec![WorkspaceTask {
                id: "1".to_string(),
                name: "Development".to_string(),
                spent_minutes: 120,
                allocated_minutes: 180,
            }],
        }
    }

    #[test]
    fn test_task_progress() {
        let workspace = make_test_workspace();
        let progress = workspace.tasks[0].progress();
        assert!((progress - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_clamps_at_one() {
        let workspace = make_test_workspace();
        assert!((workspace.progress() - 1.0).abs() < f64::EPSILON);
        assert!(workspace.over_allocation());
    }

    #[test]
    fn test_zero_allocation() {
        let task = WorkspaceTask {
            id: "t".to_string(),
            name: "T".to_string(),
            spent_minutes: 10,
            allocated_minutes: 0,
        };
        assert_eq!(task.progress(), 0.0);
    }
}
