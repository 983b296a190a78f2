//! 材料彙總與物料清單報表

use cabinet_core::{
    CabinetConfig, CabinetError, Component, MaterialKind, Result, UnitKind,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::purchasing::PurchasingCalculator;

/// 單一材料的彙總結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialTotal {
    pub material: MaterialKind,
    pub unit_kind: UnitKind,
    /// 總面積（平方英吋）或總體積（立方英吋）
    pub total: Decimal,
    /// 所需採購單位數
    pub required_units: u64,
    pub unit_descriptor: String,
}

/// 物料清單
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomReport {
    /// 材料利用率
    pub efficiency: Decimal,

    /// 元件類型 → 數量（依名稱排序）
    pub component_counts: BTreeMap<String, usize>,

    /// 材料名稱 → 彙總（依名稱排序）
    pub materials: BTreeMap<String, MaterialTotal>,
}

impl BomReport {
    /// 元件摘要，每行 `<type> = <count>`
    pub fn summary_lines(&self) -> Vec<String> {
        self.component_counts
            .iter()
            .map(|(name, count)| format!("{name} = {count}"))
            .collect()
    }

    /// 材料摘要，每種材料一行
    pub fn lines(&self) -> Vec<String> {
        let percent = PurchasingCalculator::efficiency_percent(self.efficiency);
        self.materials
            .iter()
            .map(|(name, total)| {
                format!(
                    "material = {}, total {} = {}, requires {} {} assuming {}% efficiency per unit",
                    name,
                    total.unit_kind,
                    total.total.round_dp(0),
                    total.required_units,
                    total.unit_descriptor,
                    percent
                )
            })
            .collect()
    }

    pub fn count(&self, type_name: &str) -> usize {
        self.component_counts.get(type_name).copied().unwrap_or(0)
    }

    pub fn material(&self, material: MaterialKind) -> Option<&MaterialTotal> {
        self.materials.get(material.as_str())
    }

    /// 輸出為 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for BomReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Component summary")?;
        for line in self.summary_lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "Material summary")?;
        for line in self.lines() {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// 走訪累計：可交換合併，平行與循序結果一致
#[derive(Debug, Default)]
struct Tally {
    counts: BTreeMap<String, usize>,
    quantities: BTreeMap<MaterialKind, Decimal>,
}

impl Tally {
    fn visit(root: &Component) -> Self {
        let mut tally = Tally::default();
        for visit in root.depth_first() {
            let component = visit.component;
            *tally
                .counts
                .entry(component.kind().type_name().to_string())
                .or_insert(0) += 1;
            if let Some((material, quantity)) = component.contribution() {
                *tally.quantities.entry(material).or_insert(Decimal::ZERO) += quantity;
            }
        }
        tally
    }

    fn merge(mut self, other: Tally) -> Self {
        for (name, count) in other.counts {
            *self.counts.entry(name).or_insert(0) += count;
        }
        for (material, quantity) in other.quantities {
            *self.quantities.entry(material).or_insert(Decimal::ZERO) += quantity;
        }
        self
    }
}

/// 材料彙總器
#[derive(Debug, Clone, Copy)]
pub struct MaterialAggregator {
    efficiency: Decimal,
}

impl MaterialAggregator {
    /// 利用率必須介於 0（不含）與 1（含）之間
    pub fn new(efficiency: Decimal) -> Result<Self> {
        if efficiency <= Decimal::ZERO || efficiency > Decimal::ONE {
            return Err(CabinetError::InvalidConfig(format!(
                "材料利用率必須介於 0 與 1 之間，實際 {efficiency}"
            )));
        }
        Ok(Self { efficiency })
    }

    /// 使用配置中的利用率
    pub fn from_config(config: &CabinetConfig) -> Result<Self> {
        Self::new(config.efficiency)
    }

    pub fn efficiency(&self) -> Decimal {
        self.efficiency
    }

    /// 彙總單一元件樹
    pub fn aggregate(&self, root: &Component) -> BomReport {
        tracing::info!("彙總物料：{}", root.name());
        self.report(Tally::visit(root))
    }

    /// 平行彙總多棵元件樹
    pub fn aggregate_all(&self, roots: &[Component]) -> BomReport {
        tracing::info!("平行彙總物料：{} 棵元件樹", roots.len());
        let tally = roots
            .par_iter()
            .map(Tally::visit)
            .reduce(Tally::default, Tally::merge);
        self.report(tally)
    }

    fn report(&self, tally: Tally) -> BomReport {
        let materials = tally
            .quantities
            .into_iter()
            .map(|(kind, total)| {
                let spec = kind.spec();
                let required_units =
                    PurchasingCalculator::required_units(total, spec, self.efficiency);
                tracing::debug!(
                    "材料 {}：{} {}，需 {} {}",
                    kind,
                    spec.unit_kind,
                    total,
                    required_units,
                    spec.unit_descriptor
                );
                (
                    kind.as_str().to_string(),
                    MaterialTotal {
                        material: kind,
                        unit_kind: spec.unit_kind,
                        total,
                        required_units,
                        unit_descriptor: spec.unit_descriptor.to_string(),
                    },
                )
            })
            .collect();

        BomReport {
            efficiency: self.efficiency,
            component_counts: tally.counts,
            materials,
        }
    }
}
