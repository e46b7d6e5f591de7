pub mod access_code_handler;
pub mod redeem_handler;

pub use access_code_handler::{
    extend_access_code, generate_access_code, list_code_accesses, list_quiz_access_codes,
    regenerate_access_code, revoke_access_code,
};
pub use redeem_handler::{health_check, redeem_access_code};
