// ==========================================
// 商品目录批量导入系统 - 校验阈值配置
// ==========================================
// 职责: 集中管理校验规则的数值阈值
// 红线: 严重级别→门控映射不在此配置（固定业务规则），
//       此处只允许调整提示类阈值
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ValidationConfig - 校验阈值
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// 描述最小字符数（低于此长度产生 Warning）
    ///
    /// # 默认值
    /// - 50
    pub min_description_chars: usize,

    /// 关键词共用商品数上限（严格大于该值产生 Warning）
    ///
    /// # 默认值
    /// - 5
    ///
    /// # 用途
    /// - 检测关键词过度集中（站内搜索/排名蚕食风险）
    pub keyword_conflict_threshold: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 50,
            keyword_conflict_threshold: 5,
        }
    }
}
