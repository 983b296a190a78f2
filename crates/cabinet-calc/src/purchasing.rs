//! 採購單位換算

use cabinet_core::Material;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 採購計算器
pub struct PurchasingCalculator;

impl PurchasingCalculator {
    /// 所需採購單位 = ceil(總量 / (單位大小 × 利用率))
    ///
    /// 利用率必須大於零（由 `MaterialAggregator::new` 檢查）。
    /// 超出 `u64` 範圍的單位數以 `u64::MAX` 表示
    pub fn required_units(total: Decimal, material: &Material, efficiency: Decimal) -> u64 {
        if total <= Decimal::ZERO {
            return 0;
        }
        let usable = material.unit_size * efficiency;
        (total / usable).ceil().to_u64().unwrap_or(u64::MAX)
    }

    /// 利用率百分比，四捨五入到整數，只用於報表文字
    ///
    /// 單位數計算使用原始利用率，例如 0.755 顯示為 76% 但以 75.5% 計算
    pub fn efficiency_percent(efficiency: Decimal) -> Decimal {
        (efficiency * Decimal::from(100)).round_dp(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::MaterialKind;
    use proptest::prelude::*;
    use rstest::rstest;

    fn eighty() -> Decimal {
        Decimal::new(80, 2)
    }

    #[rstest]
    #[case(Decimal::ZERO, 0)]
    #[case(Decimal::ONE, 1)]
    // 4608 × 0.8 = 3686.4
    #[case(Decimal::new(36864, 1), 1)]
    #[case(Decimal::new(36865, 1), 2)]
    #[case(Decimal::from(10000), 3)]
    fn test_sheet_units(#[case] total: Decimal, #[case] expected: u64) {
        let ply = MaterialKind::Ply3_4.spec();
        assert_eq!(
            PurchasingCalculator::required_units(total, ply, eighty()),
            expected
        );
    }

    #[test]
    fn test_board_feet() {
        let hardwood = MaterialKind::HardwoodPaint3_4.spec();
        // 144 × 0.8 = 115.2
        assert_eq!(
            PurchasingCalculator::required_units(Decimal::from(230), hardwood, eighty()),
            2
        );
        assert_eq!(
            PurchasingCalculator::required_units(Decimal::from(231), hardwood, eighty()),
            3
        );
    }

    #[test]
    fn test_units_saturate_at_u64_max() {
        let ply = MaterialKind::Ply3_4.spec();
        assert_eq!(
            PurchasingCalculator::required_units(Decimal::MAX, ply, Decimal::new(1, 2)),
            u64::MAX
        );
    }

    #[test]
    fn test_display_percent_does_not_change_units() {
        let ply = MaterialKind::Ply3_4.spec();
        // 4608 × 0.755 = 3479.04；以 76% 計會是 3502.08
        assert_eq!(
            PurchasingCalculator::required_units(Decimal::new(3490, 0), ply, Decimal::new(755, 3)),
            2
        );
    }

    #[test]
    fn test_efficiency_percent() {
        assert_eq!(PurchasingCalculator::efficiency_percent(eighty()).to_string(), "80");
        assert_eq!(
            PurchasingCalculator::efficiency_percent(Decimal::new(755, 3)).to_string(),
            "76"
        );
    }

    proptest! {
        #[test]
        fn prop_units_monotonic_in_total(a in 0i64..1_000_000, b in 0i64..1_000_000) {
            let ply = MaterialKind::Ply1_2.spec();
            let (lo, hi) = (a.min(b), a.max(b));
            prop_assert!(
                PurchasingCalculator::required_units(Decimal::from(lo), ply, eighty())
                    <= PurchasingCalculator::required_units(Decimal::from(hi), ply, eighty())
            );
        }

        #[test]
        fn prop_units_grow_as_efficiency_drops(total in 1i64..1_000_000, e1 in 1i64..=100, e2 in 1i64..=100) {
            let board = MaterialKind::HardwoodStain3_4.spec();
            let (lo, hi) = (e1.min(e2), e1.max(e2));
            let at_low = PurchasingCalculator::required_units(Decimal::from(total), board, Decimal::new(lo, 2));
            let at_high = PurchasingCalculator::required_units(Decimal::from(total), board, Decimal::new(hi, 2));
            prop_assert!(at_low >= at_high);
        }
    }
}
