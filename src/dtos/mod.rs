pub mod offerdtos;
pub mod paymentdtos;
pub mod propertydtos;
pub mod querydtos;
pub mod reviewdtos;
pub mod userdtos;
pub mod wishlistdtos;
