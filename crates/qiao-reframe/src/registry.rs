//! 重组器注册表.
//!
//! 按 CodecId 动态查找并实例化重组器, 供上层按流类型装配会话.

use std::collections::HashMap;

use qiao_core::QiaoResult;

use crate::codec_id::CodecId;
use crate::reframer::Reframer;

/// 重组器工厂函数类型
pub type ReframerFactory = fn() -> QiaoResult<Box<dyn Reframer>>;

/// 重组器注册表
///
/// 管理所有已注册的重组器, 支持按 CodecId 查找并创建实例.
pub struct ReframerRegistry {
    /// 重组器工厂映射
    reframers: HashMap<CodecId, Vec<ReframerEntry>>,
}

/// 重组器注册条目
struct ReframerEntry {
    /// 重组器名称
    name: String,
    /// 工厂函数
    factory: ReframerFactory,
}

impl ReframerRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            reframers: HashMap::new(),
        }
    }

    /// 注册一个重组器
    pub fn register_reframer(
        &mut self,
        codec_id: CodecId,
        name: impl Into<String>,
        factory: ReframerFactory,
    ) {
        self.reframers
            .entry(codec_id)
            .or_default()
            .push(ReframerEntry {
                name: name.into(),
                factory,
            });
    }

    /// 创建指定编解码器 ID 的重组器实例
    pub fn create_reframer(&self, codec_id: CodecId) -> QiaoResult<Box<dyn Reframer>> {
        let entries = self.reframers.get(&codec_id).ok_or_else(|| {
            qiao_core::QiaoError::ReframerNotFound(format!("未找到 {} 的重组器", codec_id))
        })?;
        // 使用第一个注册的重组器 (优先级最高)
        let entry = &entries[0];
        (entry.factory)()
    }

    /// 获取所有已注册的重组器名称
    pub fn list_reframers(&self) -> Vec<(CodecId, &str)> {
        let mut result = Vec::new();
        for (id, entries) in &self.reframers {
            for entry in entries {
                result.push((*id, entry.name.as_str()));
            }
        }
        result
    }
}

impl Default for ReframerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
