//! SeaORM entity definitions, one per table of the school store.

pub mod class;
pub mod profile;
pub mod remark;
pub mod student;
pub mod subject;
pub mod teacher_class;
pub mod test_result;
