pub mod confirm_dialog;
pub mod kpi_card;
pub mod line_item_table;
pub mod margin_badge;
pub mod profit_panel;
pub mod toast;
