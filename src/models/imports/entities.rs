use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 批量导入的目标实体
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "import.ts")]
pub enum ImportTarget {
    Cathedra,
    Professor,
    Student,
    Course,
    Grade,
}

/// 导入的事务粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    /// 整个文件一个事务，最后提交
    Batch,
    /// 每行单独提交；关联列在第二个事务中提交
    PerRow,
    /// 每行的每一步单独提交
    PerStep,
}

impl ImportTarget {
    pub fn policy(&self) -> ImportPolicy {
        match self {
            ImportTarget::Cathedra | ImportTarget::Course => ImportPolicy::Batch,
            ImportTarget::Professor | ImportTarget::Student => ImportPolicy::PerRow,
            ImportTarget::Grade => ImportPolicy::PerStep,
        }
    }

    /// 每行期望的列数
    pub fn column_count(&self) -> usize {
        match self {
            ImportTarget::Cathedra => 4,
            ImportTarget::Professor => 10,
            ImportTarget::Student => 8,
            ImportTarget::Course => 7,
            ImportTarget::Grade => 5,
        }
    }
}

impl std::fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImportTarget::Cathedra => "cathedra",
            ImportTarget::Professor => "professor",
            ImportTarget::Student => "student",
            ImportTarget::Course => "course",
            ImportTarget::Grade => "grade",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for ImportTarget {
    type Err = String;

    // 路径里单复数都接受
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cathedra" | "cathedras" => Ok(ImportTarget::Cathedra),
            "professor" | "professors" => Ok(ImportTarget::Professor),
            "student" | "students" => Ok(ImportTarget::Student),
            "course" | "courses" => Ok(ImportTarget::Course),
            "grade" | "grades" => Ok(ImportTarget::Grade),
            _ => Err(format!("Invalid import target: {s}")),
        }
    }
}
