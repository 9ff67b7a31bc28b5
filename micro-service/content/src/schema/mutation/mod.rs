mod account;
mod blog;

pub use account::AccountMutation;
pub use blog::BlogMutation;
