pub mod monster_list;
pub mod monster_table;
pub mod paginator;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use monster_list::{ERROR_ICON, MonsterList, MonsterListProps};
pub use monster_table::{MonsterTable, MonsterTableProps};
pub use paginator::{Paginator, PaginatorProps};
