//! 材料登錄表

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::geometry::fraction;
use crate::{CabinetError, Result};

/// 計量方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// 板材，以面積計（平方英吋）
    Area,
    /// 實木料，以體積計（立方英吋）
    Volume,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Area => "area",
            UnitKind::Volume => "volume",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 材料種類
///
/// 反序列化經由登錄表名稱查找，未知名稱回傳 `UnknownMaterial`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MaterialKind {
    #[serde(rename = "PLY_3_4")]
    Ply3_4,
    #[serde(rename = "PLY_5_8")]
    Ply5_8,
    #[serde(rename = "PLY_1_2")]
    Ply1_2,
    #[serde(rename = "PLY_3_8")]
    Ply3_8,
    #[serde(rename = "PLY_1_4")]
    Ply1_4,
    #[serde(rename = "HARDWOOD_PAINT_3_4")]
    HardwoodPaint3_4,
    #[serde(rename = "HARDWOOD_STAIN_3_4")]
    HardwoodStain3_4,
    #[serde(rename = "HARDWOOD_BANDING_PLY_3_4")]
    HardwoodBandingPly3_4,
    #[serde(rename = "NONE_3_4")]
    None3_4,
}

impl MaterialKind {
    /// 全部材料（登錄表順序）
    pub const ALL: [MaterialKind; 9] = [
        MaterialKind::Ply3_4,
        MaterialKind::Ply5_8,
        MaterialKind::Ply1_2,
        MaterialKind::Ply3_8,
        MaterialKind::Ply1_4,
        MaterialKind::HardwoodPaint3_4,
        MaterialKind::HardwoodStain3_4,
        MaterialKind::HardwoodBandingPly3_4,
        MaterialKind::None3_4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Ply3_4 => "PLY_3_4",
            MaterialKind::Ply5_8 => "PLY_5_8",
            MaterialKind::Ply1_2 => "PLY_1_2",
            MaterialKind::Ply3_8 => "PLY_3_8",
            MaterialKind::Ply1_4 => "PLY_1_4",
            MaterialKind::HardwoodPaint3_4 => "HARDWOOD_PAINT_3_4",
            MaterialKind::HardwoodStain3_4 => "HARDWOOD_STAIN_3_4",
            MaterialKind::HardwoodBandingPly3_4 => "HARDWOOD_BANDING_PLY_3_4",
            MaterialKind::None3_4 => "NONE_3_4",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// 從標準登錄表取得材料屬性
    pub fn spec(self) -> &'static Material {
        MaterialRegistry::standard().get(self)
    }

    /// 標稱厚度
    pub fn thickness(self) -> Decimal {
        self.spec().thickness
    }

    pub fn unit_kind(self) -> UnitKind {
        self.spec().unit_kind
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialKind {
    type Err = CabinetError;

    fn from_str(s: &str) -> Result<Self> {
        MaterialKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CabinetError::UnknownMaterial(s.to_string()))
    }
}

impl TryFrom<String> for MaterialKind {
    type Error = CabinetError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

/// 材料屬性（顯示與採購資訊）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    /// 材料種類
    pub kind: MaterialKind,

    /// 標稱厚度（英吋）
    pub thickness: Decimal,

    /// 計量方式
    pub unit_kind: UnitKind,

    /// 最小採購單位大小（整張板 4608 平方英吋；板呎 144 立方英吋）
    pub unit_size: Decimal,

    /// 採購單位名稱
    pub unit_descriptor: &'static str,

    /// 顯示顏色
    pub color: &'static str,
}

impl Material {
    fn sheet(kind: MaterialKind, thickness: Decimal) -> Self {
        Self {
            kind,
            thickness,
            unit_kind: UnitKind::Area,
            unit_size: Decimal::from(48 * 96),
            unit_descriptor: "sheets",
            color: "#e6cd83",
        }
    }

    fn board(kind: MaterialKind, thickness: Decimal, color: &'static str) -> Self {
        Self {
            kind,
            thickness,
            unit_kind: UnitKind::Volume,
            unit_size: Decimal::from(144),
            unit_descriptor: "board ft",
            color,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// 材料登錄表：只在首次使用時建立一次，之後為純查表
#[derive(Debug)]
pub struct MaterialRegistry {
    /// 依 MaterialKind::ALL 順序排列
    materials: Vec<Material>,
}

static STANDARD: OnceLock<MaterialRegistry> = OnceLock::new();

impl MaterialRegistry {
    /// 標準登錄表
    pub fn standard() -> &'static MaterialRegistry {
        STANDARD.get_or_init(Self::build)
    }

    fn build() -> Self {
        let materials = MaterialKind::ALL
            .iter()
            .map(|&kind| match kind {
                MaterialKind::Ply3_4 => Material::sheet(kind, fraction(23, 32)),
                MaterialKind::Ply5_8 => Material::sheet(kind, fraction(19, 32)),
                MaterialKind::Ply1_2 => Material::sheet(kind, fraction(15, 32)),
                MaterialKind::Ply3_8 => Material::sheet(kind, fraction(11, 32)),
                MaterialKind::Ply1_4 => Material::sheet(kind, fraction(1, 4)),
                MaterialKind::HardwoodPaint3_4 => {
                    Material::board(kind, fraction(3, 4), "#6e583b")
                }
                MaterialKind::HardwoodStain3_4 => {
                    Material::board(kind, fraction(3, 4), "#7a5f23")
                }
                MaterialKind::HardwoodBandingPly3_4 => {
                    Material::board(kind, fraction(23, 32), "#e3c176")
                }
                MaterialKind::None3_4 => Material::board(kind, fraction(3, 4), "#ffffff"),
            })
            .collect();

        Self { materials }
    }

    /// 依種類取得材料
    pub fn get(&self, kind: MaterialKind) -> &Material {
        &self.materials[kind.index()]
    }

    /// 依名稱查找材料
    pub fn lookup(&self, name: &str) -> Result<&Material> {
        let kind: MaterialKind = name.parse()?;
        Ok(self.get(kind))
    }

    /// 依登錄表順序列出全部材料
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
