//! # Cabinetry
//!
//! 參數化櫥櫃幾何與物料清單
//!
//! - [`cabinet_core`]：尺寸、材料、元件樹與參數配置
//! - [`cabinet_calc`]：網格、面框、抽屜、門板、層板、櫃體建構與物料彙總

pub use cabinet_calc::*;
pub use cabinet_core::*;

pub use cabinet_calc;
pub use cabinet_core;
