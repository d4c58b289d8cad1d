pub mod slot_record;
pub mod slot_view;
