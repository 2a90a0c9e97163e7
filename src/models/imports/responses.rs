use super::entities::ImportTarget;
use serde::Serialize;
use ts_rs::TS;

// 导入结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "import.ts")]
pub struct ImportSummary {
    pub target: ImportTarget,
    /// 文件中的数据行数（不含表头）
    pub total: usize,
    /// 成功写入的记录数
    pub created: usize,
}
