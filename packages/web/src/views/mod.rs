mod login;
mod register;
mod work_detail;
mod works;

pub use login::Login;
pub use register::Register;
pub use work_detail::WorkDetail;
pub use works::Works;
