//! # Cabinet Core
//!
//! 核心資料模型：尺寸、材料、元件樹與參數配置

pub mod component;
pub mod config;
pub mod geometry;
pub mod material;

// Re-export 主要類型
pub use component::{Component, ComponentKind, DepthFirst, Visit};
pub use config::{CabinetConfig, DrawerStockRule};
pub use geometry::{fraction, Dimension, Position};
pub use material::{Material, MaterialKind, MaterialRegistry, UnitKind};

/// 櫥櫃錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CabinetError {
    #[error("無效的尺寸: {0}")]
    InvalidDimension(String),

    #[error("開口過小: {0}")]
    InvalidOpening(String),

    #[error("網格配置無法滿足: {0}")]
    GridOverconstrained(String),

    #[error("找不到材料: {0}")]
    UnknownMaterial(String),

    #[error("找不到網格單元: {0}")]
    UnknownGridCell(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CabinetError>;
