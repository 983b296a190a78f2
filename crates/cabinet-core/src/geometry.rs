//! 尺寸與位置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::{CabinetError, Result};

/// 以分數表示英吋（如 23/32"），二進位分數在 Decimal 中是精確值
pub fn fraction(numerator: i64, denominator: i64) -> Decimal {
    Decimal::from(numerator) / Decimal::from(denominator)
}

/// 三維尺寸（英吋）
///
/// - width: 寬（x 軸）
/// - height: 高（z 軸）
/// - depth: 深／厚（y 軸），板材通常為材料標稱厚度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub width: Decimal,
    pub height: Decimal,
    pub depth: Decimal,
}

impl Dimension {
    /// 創建新的尺寸
    pub fn new(width: Decimal, height: Decimal, depth: Decimal) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// 零尺寸（純容器使用）
    pub fn zero() -> Self {
        Self::default()
    }

    /// 面積 = 寬 × 高
    pub fn area(&self) -> Decimal {
        self.width * self.height
    }

    /// 體積 = 寬 × 高 × 深
    pub fn volume(&self) -> Decimal {
        self.width * self.height * self.depth
    }

    /// 檢查三個方向皆大於零
    pub fn ensure_positive(&self, label: &str) -> Result<()> {
        if self.width <= Decimal::ZERO || self.height <= Decimal::ZERO || self.depth <= Decimal::ZERO
        {
            return Err(CabinetError::InvalidDimension(format!(
                "{label}: 尺寸必須大於零（寬 {}, 高 {}, 深 {}）",
                self.width, self.height, self.depth
            )));
        }
        Ok(())
    }

    /// 檢查三個方向皆不為負
    pub fn ensure_non_negative(&self, label: &str) -> Result<()> {
        if self.width < Decimal::ZERO || self.height < Decimal::ZERO || self.depth < Decimal::ZERO
        {
            return Err(CabinetError::InvalidDimension(format!(
                "{label}: 尺寸不可為負（寬 {}, 高 {}, 深 {}）",
                self.width, self.height, self.depth
            )));
        }
        Ok(())
    }
}

/// 相對於父元件的位置偏移。x = 寬度方向, y = 深度方向, z = 高度方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: Decimal,
    pub y: Decimal,
    pub z: Decimal,
}

impl Position {
    pub fn new(x: Decimal, y: Decimal, z: Decimal) -> Self {
        Self { x, y, z }
    }

    /// 原點
    pub fn origin() -> Self {
        Self::default()
    }

    /// 沿 x 軸偏移
    pub fn along_x(x: Decimal) -> Self {
        Self::new(x, Decimal::ZERO, Decimal::ZERO)
    }

    /// 沿 z 軸偏移
    pub fn along_z(z: Decimal) -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, z)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
