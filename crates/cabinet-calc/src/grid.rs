//! 網格配置計算
//!
//! 將外框尺寸扣除內距與間隔後，依權重或固定尺寸分配給各列、各欄。
//! 列由上往下編號（第 0 列在最上方），欄由左往右編號。

use cabinet_core::{CabinetError, Position, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 列／欄的尺寸規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    /// 依權重分配剩餘空間
    Weighted(Decimal),
    /// 固定尺寸
    Fixed(Decimal),
}

impl Track {
    /// 權重為 1 的列／欄
    pub fn even() -> Self {
        Track::Weighted(Decimal::ONE)
    }

    /// n 個等分
    pub fn evenly(n: usize) -> Vec<Track> {
        vec![Track::even(); n]
    }

    fn value(&self) -> Decimal {
        match self {
            Track::Weighted(v) | Track::Fixed(v) => *v,
        }
    }
}

/// 內距（左, 下, 右, 上）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: Decimal,
    pub bottom: Decimal,
    pub right: Decimal,
    pub top: Decimal,
}

impl Padding {
    pub fn new(left: Decimal, bottom: Decimal, right: Decimal, top: Decimal) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// 四邊相同
    pub fn uniform(value: Decimal) -> Self {
        Self::new(value, value, value, value)
    }

    /// 左右為立梃寬，上下為橫檔寬
    pub fn frame(stile: Decimal, rail: Decimal) -> Self {
        Self::new(stile, rail, stile, rail)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    fn is_non_negative(&self) -> bool {
        [self.left, self.bottom, self.right, self.top]
            .iter()
            .all(|v| *v >= Decimal::ZERO)
    }
}

/// 網格單元：一個矩形開口
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// 名稱 `r{row}c{col}`
    pub name: String,
    pub row: usize,
    pub col: usize,
    /// 左下角 x（相對於外框）
    pub x: Decimal,
    /// 左下角 z（相對於外框）
    pub z: Decimal,
    pub width: Decimal,
    pub height: Decimal,
}

impl GridCell {
    /// 單元名稱
    pub fn cell_name(row: usize, col: usize) -> String {
        format!("r{row}c{col}")
    }

    /// 單元左下角位置（y = 0）
    pub fn position(&self) -> Position {
        Position::new(self.x, Decimal::ZERO, self.z)
    }
}

/// 網格配置參數
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub width: Decimal,
    pub height: Decimal,
    pub padding: Padding,
    pub rows: Vec<Track>,
    pub cols: Vec<Track>,
    pub row_spacing: Decimal,
    pub column_spacing: Decimal,
}

impl GridSpec {
    /// 預設為單一單元、無內距、無間隔
    pub fn new(width: Decimal, height: Decimal) -> Self {
        Self {
            width,
            height,
            padding: Padding::zero(),
            rows: vec![Track::even()],
            cols: vec![Track::even()],
            row_spacing: Decimal::ZERO,
            column_spacing: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置列
    pub fn with_rows(mut self, rows: Vec<Track>) -> Self {
        self.rows = rows;
        self
    }

    /// 建構器模式：設置欄
    pub fn with_cols(mut self, cols: Vec<Track>) -> Self {
        self.cols = cols;
        self
    }

    /// 建構器模式：設置內距
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// 建構器模式：設置列間距與欄間距
    pub fn with_spacing(mut self, row_spacing: Decimal, column_spacing: Decimal) -> Self {
        self.row_spacing = row_spacing;
        self.column_spacing = column_spacing;
        self
    }

    /// 計算網格
    pub fn build(self) -> Result<ComponentGrid> {
        ComponentGrid::new(self)
    }
}

/// 已計算完成的網格
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGrid {
    spec: GridSpec,
    row_sizes: Vec<Decimal>,
    col_sizes: Vec<Decimal>,
    cells: Vec<GridCell>,
}

impl ComponentGrid {
    /// 依配置計算各單元的位置與尺寸
    pub fn new(spec: GridSpec) -> Result<Self> {
        if spec.width <= Decimal::ZERO || spec.height <= Decimal::ZERO {
            return Err(CabinetError::InvalidDimension(format!(
                "網格外框尺寸必須大於零（寬 {}, 高 {}）",
                spec.width, spec.height
            )));
        }
        if !spec.padding.is_non_negative() {
            return Err(CabinetError::InvalidDimension(format!(
                "網格內距不可為負: {:?}",
                spec.padding
            )));
        }
        if spec.row_spacing < Decimal::ZERO || spec.column_spacing < Decimal::ZERO {
            return Err(CabinetError::InvalidDimension(format!(
                "網格間距不可為負（列 {}, 欄 {}）",
                spec.row_spacing, spec.column_spacing
            )));
        }

        let interior_width = spec.width - (spec.padding.left + spec.padding.right);
        let interior_height = spec.height - (spec.padding.bottom + spec.padding.top);

        let row_sizes = resolve_tracks("列", &spec.rows, interior_height, spec.row_spacing)?;
        let col_sizes = resolve_tracks("欄", &spec.cols, interior_width, spec.column_spacing)?;

        // 第 0 列在最上方
        let mut row_z = Vec::with_capacity(row_sizes.len());
        let mut consumed = Decimal::ZERO;
        for (i, size) in row_sizes.iter().enumerate() {
            consumed += *size;
            let spacing = spec.row_spacing * Decimal::from(i as u64);
            row_z.push(spec.padding.bottom + interior_height - (consumed + spacing));
        }

        let mut col_x = Vec::with_capacity(col_sizes.len());
        let mut consumed = Decimal::ZERO;
        for (i, size) in col_sizes.iter().enumerate() {
            let spacing = spec.column_spacing * Decimal::from(i as u64);
            col_x.push(spec.padding.left + spacing + consumed);
            consumed += *size;
        }

        let mut cells = Vec::with_capacity(row_sizes.len() * col_sizes.len());
        for (row, (&z, &height)) in row_z.iter().zip(&row_sizes).enumerate() {
            for (col, (&x, &width)) in col_x.iter().zip(&col_sizes).enumerate() {
                cells.push(GridCell {
                    name: GridCell::cell_name(row, col),
                    row,
                    col,
                    x,
                    z,
                    width,
                    height,
                });
            }
        }

        tracing::debug!(
            "網格 {}x{}：內部 {} x {}",
            row_sizes.len(),
            col_sizes.len(),
            interior_width,
            interior_height
        );

        Ok(Self {
            spec,
            row_sizes,
            col_sizes,
            cells,
        })
    }

    pub fn width(&self) -> Decimal {
        self.spec.width
    }

    pub fn height(&self) -> Decimal {
        self.spec.height
    }

    pub fn padding(&self) -> Padding {
        self.spec.padding
    }

    pub fn row_spacing(&self) -> Decimal {
        self.spec.row_spacing
    }

    pub fn column_spacing(&self) -> Decimal {
        self.spec.column_spacing
    }

    /// 內部寬度（外框扣除左右內距）
    pub fn interior_width(&self) -> Decimal {
        self.spec.width - (self.spec.padding.left + self.spec.padding.right)
    }

    /// 內部高度（外框扣除上下內距）
    pub fn interior_height(&self) -> Decimal {
        self.spec.height - (self.spec.padding.bottom + self.spec.padding.top)
    }

    pub fn row_sizes(&self) -> &[Decimal] {
        &self.row_sizes
    }

    pub fn col_sizes(&self) -> &[Decimal] {
        &self.col_sizes
    }

    pub fn row_count(&self) -> usize {
        self.row_sizes.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_sizes.len()
    }

    /// 全部單元（逐列、由左至右）
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// 指定列的單元
    pub fn row(&self, row: usize) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(move |cell| cell.row == row)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row >= self.row_count() || col >= self.col_count() {
            return None;
        }
        self.cells.get(row * self.col_count() + col)
    }

    /// 依名稱查找單元
    pub fn cell(&self, name: &str) -> Result<&GridCell> {
        self.cells
            .iter()
            .find(|cell| cell.name == name)
            .ok_or_else(|| CabinetError::UnknownGridCell(name.to_string()))
    }
}

/// 權重分配的小數位數（百萬分之一英吋）
///
/// 各份額取有限位數，最後一個權重項取餘數，加總與面積彙總才能保持精確
pub const SHARE_SCALE: u32 = 6;

/// 將可用空間分配給各列／欄。最後一個權重項取得精確餘數，使總和不失真
fn resolve_tracks(
    axis: &str,
    tracks: &[Track],
    total: Decimal,
    spacing: Decimal,
) -> Result<Vec<Decimal>> {
    if tracks.is_empty() {
        return Err(CabinetError::InvalidDimension(format!("{axis}數量不可為零")));
    }
    if let Some(bad) = tracks.iter().find(|t| t.value() <= Decimal::ZERO) {
        return Err(CabinetError::InvalidDimension(format!(
            "{axis}尺寸或權重必須大於零: {bad:?}"
        )));
    }
    if total <= Decimal::ZERO {
        return Err(CabinetError::GridOverconstrained(format!(
            "{axis}方向內部空間不足: {total}"
        )));
    }

    let gaps = spacing * Decimal::from((tracks.len() - 1) as u64);
    let fixed: Decimal = tracks
        .iter()
        .filter_map(|t| match t {
            Track::Fixed(v) => Some(*v),
            Track::Weighted(_) => None,
        })
        .sum();
    let total_weight: Decimal = tracks
        .iter()
        .filter_map(|t| match t {
            Track::Weighted(w) => Some(*w),
            Track::Fixed(_) => None,
        })
        .sum();
    let weighted_space = total - gaps - fixed;

    let last_weighted = tracks
        .iter()
        .rposition(|t| matches!(t, Track::Weighted(_)));

    match last_weighted {
        None if weighted_space != Decimal::ZERO => {
            return Err(CabinetError::GridOverconstrained(format!(
                "{axis}全為固定尺寸，總和 {} 與可用空間 {} 不符",
                fixed + gaps,
                total
            )));
        }
        Some(_) if weighted_space <= Decimal::ZERO => {
            return Err(CabinetError::GridOverconstrained(format!(
                "{axis}固定尺寸與間隔 {} 已超出可用空間 {}",
                fixed + gaps,
                total
            )));
        }
        _ => {}
    }

    let mut sizes = Vec::with_capacity(tracks.len());
    let mut allocated = Decimal::ZERO;
    for (i, track) in tracks.iter().enumerate() {
        let size = match track {
            Track::Fixed(v) => *v,
            Track::Weighted(_) if Some(i) == last_weighted => weighted_space - allocated,
            Track::Weighted(w) => {
                let share = (weighted_space * *w / total_weight).round_dp(SHARE_SCALE);
                allocated += share;
                share
            }
        };
        if size <= Decimal::ZERO {
            return Err(CabinetError::GridOverconstrained(format!(
                "第 {i} {axis}尺寸不足: {size}"
            )));
        }
        sizes.push(size);
    }

    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::fraction;
    use rstest::rstest;

    fn frame_grid(rows: Vec<Track>, cols: Vec<Track>) -> ComponentGrid {
        let member = fraction(3, 2);
        GridSpec::new(Decimal::from(36), Decimal::from(31))
            .with_padding(Padding::uniform(member))
            .with_spacing(member, member)
            .with_rows(rows)
            .with_cols(cols)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_cell() {
        let grid = GridSpec::new(Decimal::from(10), Decimal::from(20))
            .build()
            .unwrap();

        assert_eq!(grid.cells().len(), 1);
        let cell = &grid.cells()[0];
        assert_eq!(cell.name, "r0c0");
        assert_eq!(cell.width, Decimal::from(10));
        assert_eq!(cell.height, Decimal::from(20));
        assert_eq!(cell.position(), Position::origin());
    }

    #[test]
    fn test_row_zero_is_on_top() {
        let grid = frame_grid(Track::evenly(2), Track::evenly(1));

        // 內部高度 31 − 3 = 28，扣除 1.5 間隔後兩列各 13.25
        let top = grid.cell("r0c0").unwrap();
        let bottom = grid.cell("r1c0").unwrap();
        assert_eq!(top.height, fraction(53, 4));
        assert_eq!(bottom.z, fraction(3, 2));
        assert_eq!(top.z, fraction(3, 2) + fraction(53, 4) + fraction(3, 2));
        assert!(top.z > bottom.z);
    }

    #[test]
    fn test_columns_left_to_right() {
        let grid = frame_grid(Track::evenly(1), vec![Track::Fixed(Decimal::from(12)), Track::even()]);

        let left = grid.cell("r0c0").unwrap();
        let right = grid.cell("r0c1").unwrap();
        assert_eq!(left.x, fraction(3, 2));
        assert_eq!(left.width, Decimal::from(12));
        assert_eq!(right.x, fraction(3, 2) + Decimal::from(12) + fraction(3, 2));
        // 36 − 3 − 1.5 − 12
        assert_eq!(right.width, fraction(39, 2));
    }

    #[test]
    fn test_uneven_weights_sum_exactly() {
        let grid = frame_grid(Track::evenly(3), Track::evenly(3));

        let row_total: Decimal = grid.row_sizes().iter().sum();
        let col_total: Decimal = grid.col_sizes().iter().sum();

        // 三等分無法以有限小數表示，仍須精確加總
        assert_eq!(row_total + fraction(3, 2) * Decimal::from(2), grid.interior_height());
        assert_eq!(col_total + fraction(3, 2) * Decimal::from(2), grid.interior_width());
        assert_eq!(grid.cells().len(), 9);
        assert_eq!(grid.cell_at(2, 1).map(|c| c.name.as_str()), Some("r2c1"));
        assert!(grid.cell_at(3, 0).is_none());
    }

    #[test]
    fn test_non_terminating_weights_sum_exactly() {
        // 7:4:5:1 加一個固定欄，權重比例皆為無限小數
        let member = fraction(3, 2);
        let grid = GridSpec::new(fraction(545, 4), Decimal::from(20))
            .with_padding(Padding::uniform(member))
            .with_spacing(member, member)
            .with_cols(vec![
                Track::Weighted(Decimal::from(7)),
                Track::Weighted(Decimal::from(4)),
                Track::Fixed(fraction(25, 4)),
                Track::Weighted(Decimal::from(5)),
                Track::Weighted(Decimal::ONE),
            ])
            .build()
            .unwrap();

        let col_total: Decimal = grid.col_sizes().iter().sum();
        assert_eq!(col_total + member * Decimal::from(4), grid.interior_width());
        assert!(grid
            .col_sizes()
            .iter()
            .all(|s| s.normalize().scale() <= SHARE_SCALE));
        assert_eq!(grid.col_sizes()[2], fraction(25, 4));

        // 最右欄緊貼右側立梃
        let last = grid.cell("r0c4").unwrap();
        assert_eq!(last.x + last.width, grid.width() - member);
    }

    #[test]
    fn test_unknown_cell() {
        let grid = frame_grid(Track::evenly(2), Track::evenly(1));
        assert_eq!(
            grid.cell("r5c0"),
            Err(CabinetError::UnknownGridCell("r5c0".to_string()))
        );
    }

    #[test]
    fn test_all_fixed_must_match_exactly() {
        let ok = GridSpec::new(Decimal::from(10), Decimal::from(10))
            .with_rows(vec![Track::Fixed(Decimal::from(4)), Track::Fixed(Decimal::from(6))])
            .build();
        assert!(ok.is_ok());

        let short = GridSpec::new(Decimal::from(10), Decimal::from(10))
            .with_rows(vec![Track::Fixed(Decimal::from(4)), Track::Fixed(Decimal::from(5))])
            .build();
        assert!(matches!(short, Err(CabinetError::GridOverconstrained(_))));
    }

    #[rstest]
    // 固定尺寸吃光空間
    #[case(vec![Track::Fixed(Decimal::from(28)), Track::even()])]
    // 間隔吃光空間
    #[case(Track::evenly(20))]
    fn test_overconstrained(#[case] rows: Vec<Track>) {
        let member = fraction(3, 2);
        let result = GridSpec::new(Decimal::from(36), Decimal::from(31))
            .with_padding(Padding::uniform(member))
            .with_spacing(member, member)
            .with_rows(rows)
            .build();

        assert!(matches!(result, Err(CabinetError::GridOverconstrained(_))));
    }

    #[test]
    fn test_padding_larger_than_frame() {
        let result = GridSpec::new(Decimal::from(3), Decimal::from(10))
            .with_padding(Padding::frame(Decimal::from(2), Decimal::ONE))
            .build();
        assert!(matches!(result, Err(CabinetError::GridOverconstrained(_))));
    }

    #[rstest]
    #[case(Vec::new())]
    #[case(vec![Track::Weighted(Decimal::ZERO)])]
    #[case(vec![Track::Fixed(Decimal::NEGATIVE_ONE)])]
    fn test_invalid_tracks(#[case] cols: Vec<Track>) {
        let result = GridSpec::new(Decimal::from(10), Decimal::from(10))
            .with_cols(cols)
            .build();
        assert!(matches!(result, Err(CabinetError::InvalidDimension(_))));
    }
}
