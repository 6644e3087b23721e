pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token_utils;

#[cfg(test)]
pub(crate) mod test_support;
