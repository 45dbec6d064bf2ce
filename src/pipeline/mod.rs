pub mod stage1_schema;
pub mod stage2_aggregate;
pub mod stage3_comments;
pub mod stage4_summary;
pub mod stage5_report;
