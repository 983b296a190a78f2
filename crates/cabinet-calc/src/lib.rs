//! # Cabinet Calculation Engine
//!
//! 櫥櫃元件建構與物料計算

pub mod aggregator;
pub mod cabinet;
pub mod cutlist;
pub mod door;
pub mod drawer;
pub mod face_frame;
pub mod grid;
pub mod purchasing;
pub mod shelf;

// Re-export 主要類型
pub use aggregator::{BomReport, MaterialAggregator, MaterialTotal};
pub use cabinet::{
    assemble_in_row, FaceFrameLayout, LowerCabinet, LowerCabinetSpec, ShelfPlan, UpperCabinet,
    UpperCabinetSpec,
};
pub use cutlist::{cut_list, CutListRecord};
pub use door::{DoorOptions, HingePreference, HingeSide, HingeStile, ShakerDoor};
pub use drawer::BlumDrawer;
pub use face_frame::{CellFill, FaceFrame};
pub use grid::{ComponentGrid, GridCell, GridSpec, Padding, Track, SHARE_SCALE};
pub use purchasing::PurchasingCalculator;
pub use shelf::{Shelf, ShelfSpacing, ShelfStyle};
