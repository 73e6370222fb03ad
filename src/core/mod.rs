pub mod commodity;
pub mod price;
pub mod quote;
pub mod value;
