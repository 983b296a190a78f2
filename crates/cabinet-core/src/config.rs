//! 櫥櫃參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geometry::fraction;
use crate::material::MaterialKind;
use crate::{CabinetError, Result};

/// 抽屜用料門檻：開口寬度達到 `min_opening_width` 時套用此列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerStockRule {
    /// 門檻（含）
    pub min_opening_width: Decimal,

    /// 箱壁材料（前、後、左右側板）
    pub wall_material: MaterialKind,

    /// 底板材料
    pub bottom_material: MaterialKind,
}

impl DrawerStockRule {
    pub fn new(
        min_opening_width: Decimal,
        wall_material: MaterialKind,
        bottom_material: MaterialKind,
    ) -> Self {
        Self {
            min_opening_width,
            wall_material,
            bottom_material,
        }
    }
}

/// 櫥櫃建構參數。所有建構函式以引用方式傳入，取代全域預設值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetConfig {
    // 面框與門板

    /// 面框材料
    pub face_frame_material: MaterialKind,

    /// 面框立梃／橫檔寬度
    pub face_frame_member_width: Decimal,

    /// 面框兩側超出箱體的寬度
    pub face_frame_side_overhang: Decimal,

    /// 相鄰門板／抽屜面板之間的縫隙
    pub overlay_gap: Decimal,

    // 下櫃

    /// 檯面高度
    pub counter_height: Decimal,

    /// 下櫃預設高度（不含檯面）
    pub lower_height: Decimal,

    /// 下櫃深度（含面框）
    pub lower_depth: Decimal,

    /// 下櫃箱體材料
    pub lower_case_material: MaterialKind,

    /// 下櫃背板材料
    pub lower_back_material: MaterialKind,

    /// 踢腳高度（至面框底部）
    pub toe_kick_height: Decimal,

    /// 踢腳板內縮深度
    pub toe_kick_depth: Decimal,

    /// 頂部拉條寬度
    pub stretcher_width: Decimal,

    /// 底板嵌槽深度
    pub floor_dado_depth: Decimal,

    /// 嵌槽高於踢腳開口的距離
    pub dado_above_toe_kick: Decimal,

    // 吊櫃

    /// 天花板高度
    pub ceiling_height: Decimal,

    /// 頂冠線條預留高度
    pub crown_space_height: Decimal,

    /// 檯面至吊櫃底部的距離
    pub counter_to_uppers_gap: Decimal,

    /// 吊櫃深度（含面框）
    pub upper_depth: Decimal,

    /// 吊櫃箱體材料
    pub upper_case_material: MaterialKind,

    /// 吊櫃掛條材料
    pub upper_nailer_material: MaterialKind,

    /// 吊櫃背板材料
    pub upper_back_material: MaterialKind,

    /// 掛條寬度
    pub nailer_width: Decimal,

    /// 櫃底至底板下緣距離
    pub upper_bottom_inset: Decimal,

    /// 櫃頂至頂板上緣距離
    pub upper_top_inset: Decimal,

    // 抽屜

    /// 抽屜用料門檻表（依開口寬度遞增）
    pub drawer_stock_rules: Vec<DrawerStockRule>,

    /// 抽屜箱最大高度
    pub max_drawer_box_height: Decimal,

    /// 抽屜箱高度與開口高度的最小差距
    pub drawer_vertical_clearance: Decimal,

    /// 抽屜內寬與開口寬度的差距（滑軌空間）
    pub drawer_side_clearance: Decimal,

    /// 底板嵌槽深度佔箱壁厚度的比例
    pub drawer_bottom_dado_ratio: Decimal,

    /// 抽屜箱底部高於開口的距離
    pub drawer_height_above_opening: Decimal,

    /// 抽屜底板內縮距離
    pub drawer_bottom_recess: Decimal,

    // Shaker 門板與抽屜面板

    /// 框架立梃／橫檔寬度
    pub shaker_member_width: Decimal,

    /// 框架材料
    pub shaker_frame_material: MaterialKind,

    /// 中心板材料
    pub panel_inset_material: MaterialKind,

    // 層板

    /// 層板材料
    pub shelf_material: MaterialKind,

    /// 封邊材料
    pub shelf_banding_material: MaterialKind,

    /// 封邊條寬度（前後方向）
    pub shelf_banding_depth: Decimal,

    /// 層板與箱體內部的間隙
    pub shelf_clearance: Decimal,

    // 報表

    /// 材料利用率（0 < efficiency <= 1）
    pub efficiency: Decimal,
}

impl Default for CabinetConfig {
    fn default() -> Self {
        Self {
            face_frame_material: MaterialKind::HardwoodPaint3_4,
            face_frame_member_width: fraction(3, 2),
            face_frame_side_overhang: fraction(1, 8),
            overlay_gap: fraction(1, 4),

            counter_height: Decimal::from(36),
            lower_height: fraction(69, 2),
            lower_depth: Decimal::from(24),
            lower_case_material: MaterialKind::Ply3_4,
            lower_back_material: MaterialKind::Ply1_4,
            toe_kick_height: fraction(7, 2),
            toe_kick_depth: fraction(5, 2),
            stretcher_width: fraction(5, 2),
            floor_dado_depth: fraction(3, 8),
            dado_above_toe_kick: fraction(1, 2),

            ceiling_height: Decimal::from(96),
            crown_space_height: Decimal::from(3),
            counter_to_uppers_gap: Decimal::from(18),
            upper_depth: Decimal::from(12),
            upper_case_material: MaterialKind::Ply3_4,
            upper_nailer_material: MaterialKind::HardwoodPaint3_4,
            upper_back_material: MaterialKind::Ply1_4,
            nailer_width: fraction(5, 2),
            upper_bottom_inset: fraction(3, 2),
            upper_top_inset: Decimal::ONE,

            drawer_stock_rules: vec![
                DrawerStockRule::new(Decimal::ZERO, MaterialKind::Ply1_2, MaterialKind::Ply1_4),
                DrawerStockRule::new(
                    Decimal::from(24),
                    MaterialKind::Ply5_8,
                    MaterialKind::Ply1_4,
                ),
                DrawerStockRule::new(
                    Decimal::from(33),
                    MaterialKind::Ply5_8,
                    MaterialKind::Ply3_8,
                ),
            ],
            max_drawer_box_height: Decimal::from(5),
            drawer_vertical_clearance: fraction(25, 32),
            drawer_side_clearance: fraction(31, 16),
            drawer_bottom_dado_ratio: fraction(1, 2),
            drawer_height_above_opening: fraction(9, 16),
            drawer_bottom_recess: fraction(1, 2),

            shaker_member_width: Decimal::from(2),
            shaker_frame_material: MaterialKind::HardwoodPaint3_4,
            panel_inset_material: MaterialKind::Ply1_4,

            shelf_material: MaterialKind::Ply3_4,
            shelf_banding_material: MaterialKind::HardwoodBandingPly3_4,
            shelf_banding_depth: fraction(3, 4),
            shelf_clearance: fraction(1, 8),

            efficiency: fraction(4, 5),
        }
    }
}

impl CabinetConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置材料利用率
    pub fn with_efficiency(mut self, efficiency: Decimal) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// 建構器模式：設置面框材料
    pub fn with_face_frame_material(mut self, material: MaterialKind) -> Self {
        self.face_frame_material = material;
        self
    }

    /// 建構器模式：設置 Shaker 框架與中心板材料（如油漆級／染色級）
    pub fn with_shaker_materials(mut self, frame: MaterialKind, panel: MaterialKind) -> Self {
        self.shaker_frame_material = frame;
        self.panel_inset_material = panel;
        self
    }

    /// 建構器模式：設置層板材料
    pub fn with_shelf_material(mut self, material: MaterialKind) -> Self {
        self.shelf_material = material;
        self
    }

    /// 建構器模式：設置抽屜用料門檻表（自動依門檻排序）
    pub fn with_drawer_stock_rules(mut self, mut rules: Vec<DrawerStockRule>) -> Self {
        rules.sort_by(|a, b| a.min_opening_width.cmp(&b.min_opening_width));
        self.drawer_stock_rules = rules;
        self
    }

    /// 建構器模式：設置抽屜箱最大高度
    pub fn with_max_drawer_box_height(mut self, height: Decimal) -> Self {
        self.max_drawer_box_height = height;
        self
    }

    /// 建構器模式：設置下櫃深度
    pub fn with_lower_depth(mut self, depth: Decimal) -> Self {
        self.lower_depth = depth;
        self
    }

    /// 建構器模式：設置吊櫃深度
    pub fn with_upper_depth(mut self, depth: Decimal) -> Self {
        self.upper_depth = depth;
        self
    }

    /// 吊櫃預設高度 = 天花板 − 頂冠 − 間距 − 檯面
    pub fn upper_height(&self) -> Decimal {
        self.ceiling_height
            - (self.crown_space_height + self.counter_to_uppers_gap + self.counter_height)
    }

    /// 吊櫃預設安裝高度 = 檯面 + 間距
    pub fn upper_mount_height(&self) -> Decimal {
        self.counter_height + self.counter_to_uppers_gap
    }

    /// 大覆蓋量（單獨一側蓋住整條立梃）
    pub fn large_overlay(&self) -> Decimal {
        self.face_frame_member_width - self.overlay_gap / Decimal::from(2)
    }

    /// 小覆蓋量（與相鄰門板平分立梃）
    pub fn small_overlay(&self) -> Decimal {
        (self.face_frame_member_width - self.overlay_gap) / Decimal::from(2)
    }

    /// 依開口寬度選擇抽屜用料。剛好落在門檻上時取較厚的一列
    pub fn drawer_stock_for(&self, opening_width: Decimal) -> Option<&DrawerStockRule> {
        self.drawer_stock_rules
            .iter()
            .filter(|rule| rule.min_opening_width <= opening_width)
            .max_by(|a, b| a.min_opening_width.cmp(&b.min_opening_width))
    }

    /// 檢查配置是否合理
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("face_frame_member_width", self.face_frame_member_width),
            ("counter_height", self.counter_height),
            ("lower_height", self.lower_height),
            ("lower_depth", self.lower_depth),
            ("toe_kick_height", self.toe_kick_height),
            ("toe_kick_depth", self.toe_kick_depth),
            ("stretcher_width", self.stretcher_width),
            ("upper_depth", self.upper_depth),
            ("nailer_width", self.nailer_width),
            ("max_drawer_box_height", self.max_drawer_box_height),
            ("shaker_member_width", self.shaker_member_width),
            ("shelf_banding_depth", self.shelf_banding_depth),
        ];
        for (name, value) in positive {
            if value <= Decimal::ZERO {
                return Err(CabinetError::InvalidConfig(format!(
                    "{name} 必須大於零，實際 {value}"
                )));
            }
        }

        let non_negative = [
            ("face_frame_side_overhang", self.face_frame_side_overhang),
            ("overlay_gap", self.overlay_gap),
            ("floor_dado_depth", self.floor_dado_depth),
            ("dado_above_toe_kick", self.dado_above_toe_kick),
            ("upper_bottom_inset", self.upper_bottom_inset),
            ("upper_top_inset", self.upper_top_inset),
            ("drawer_vertical_clearance", self.drawer_vertical_clearance),
            ("drawer_side_clearance", self.drawer_side_clearance),
            ("drawer_bottom_dado_ratio", self.drawer_bottom_dado_ratio),
            ("shelf_clearance", self.shelf_clearance),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(CabinetError::InvalidConfig(format!(
                    "{name} 不可為負，實際 {value}"
                )));
            }
        }

        if self.overlay_gap >= self.face_frame_member_width {
            return Err(CabinetError::InvalidConfig(format!(
                "overlay_gap {} 必須小於面框寬度 {}",
                self.overlay_gap, self.face_frame_member_width
            )));
        }

        if self.upper_height() <= Decimal::ZERO {
            return Err(CabinetError::InvalidConfig(format!(
                "吊櫃高度必須大於零，實際 {}",
                self.upper_height()
            )));
        }

        if self.efficiency <= Decimal::ZERO || self.efficiency > Decimal::ONE {
            return Err(CabinetError::InvalidConfig(format!(
                "材料利用率必須介於 0 與 1 之間，實際 {}",
                self.efficiency
            )));
        }

        if self.drawer_stock_rules.is_empty() {
            return Err(CabinetError::InvalidConfig(
                "抽屜用料門檻表不可為空".to_string(),
            ));
        }
        if self
            .drawer_stock_rules
            .iter()
            .any(|rule| rule.min_opening_width < Decimal::ZERO)
        {
            return Err(CabinetError::InvalidConfig(
                "抽屜用料門檻不可為負".to_string(),
            ));
        }

        Ok(())
    }

    /// 從 JSON 讀取配置
    ///
    /// 材料欄位（名稱以 `material` 結尾）先經登錄表查找，未知名稱回傳 `UnknownMaterial`
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CabinetError::InvalidConfig(format!("JSON 解析失敗: {e}")))?;
        check_material_names(&value)?;

        let config: Self = serde_json::from_value(value)
            .map_err(|e| CabinetError::InvalidConfig(format!("JSON 解析失敗: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// 輸出為 JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CabinetError::InvalidConfig(format!("JSON 輸出失敗: {e}")))
    }
}

fn check_material_names(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(fields) => {
            for (key, field) in fields {
                if let Some(name) = field.as_str().filter(|_| key.ends_with("material")) {
                    name.parse::<MaterialKind>()?;
                }
                check_material_names(field)?;
            }
            Ok(())
        }
        serde_json::Value::Array(items) => items.iter().try_for_each(check_material_names),
        _ => Ok(()),
    }
}
