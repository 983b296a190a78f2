//! 裁切清單（供外部排版工具使用的資料，不負責寫檔）

use cabinet_core::{Component, MaterialKind, Position};
use rust_decimal::Decimal;
use serde::Serialize;

/// 一片板件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutListRecord {
    /// 從根到此板件的名稱路徑，以 `/` 分隔
    pub path: String,
    pub label: String,
    pub material: MaterialKind,
    pub width: Decimal,
    pub height: Decimal,
    pub depth: Decimal,
    /// 絕對位置
    pub x: Decimal,
    pub y: Decimal,
    pub z: Decimal,
}

/// 依深度優先順序列出所有板件
pub fn cut_list(root: &Component) -> Vec<CutListRecord> {
    let mut records = Vec::new();
    let mut stack: Vec<(&Component, Position, String)> =
        vec![(root, Position::origin(), String::new())];

    while let Some((component, parent, prefix)) = stack.pop() {
        let absolute = component.absolute_position(parent);
        let path = if prefix.is_empty() {
            component.name().to_string()
        } else {
            format!("{prefix}/{}", component.name())
        };

        if let Some(material) = component.material() {
            let dimension = component.dimension();
            records.push(CutListRecord {
                path: path.clone(),
                label: component.name().to_string(),
                material,
                width: dimension.width,
                height: dimension.height,
                depth: dimension.depth,
                x: absolute.x,
                y: absolute.y,
                z: absolute.z,
            });
        }

        for child in component.children().iter().rev() {
            stack.push((child, absolute, path.clone()));
        }
    }

    tracing::debug!("{} 裁切清單：{} 片", root.name(), records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::{CabinetConfig, ComponentKind};

    use crate::cabinet::{LowerCabinet, LowerCabinetSpec};

    #[test]
    fn test_cut_list_paths_and_positions() {
        let config = CabinetConfig::default();
        let cabinet = LowerCabinet::build(
            &LowerCabinetSpec::new("Base", Decimal::from(24), &config),
            &config,
        )
        .unwrap()
        .with_position(Position::along_x(Decimal::from(100)));

        let records = cut_list(&cabinet);

        assert_eq!(
            records.len(),
            cabinet.count_kind(ComponentKind::RectangularComponent)
        );

        let right = records
            .iter()
            .find(|r| r.label == "Base Case Right Side")
            .unwrap();
        assert_eq!(right.path, "Base/Base Case/Base Case Right Side");
        assert_eq!(right.material, MaterialKind::Ply3_4);
        // 100 + 24 − 23/32
        assert_eq!(right.x, Decimal::from(124) - MaterialKind::Ply3_4.thickness());
        assert_eq!(right.y, config.face_frame_material.thickness());
    }

    #[test]
    fn test_cut_list_serializes() {
        let panel = Component::panel(
            "Shelf",
            Decimal::from(30),
            Decimal::from(11),
            MaterialKind::Ply3_4,
            Position::origin(),
        )
        .unwrap();

        let records = cut_list(&panel);
        let json = serde_json::to_string(&records).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "Shelf");
        assert!(json.contains("\"material\":\"PLY_3_4\""));
    }
}
