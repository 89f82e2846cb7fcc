pub mod frame;
pub mod repository;
pub mod table;

pub use repository::DataRepository;
pub use table::Table;
