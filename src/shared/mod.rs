pub mod constants;
pub mod validation;
pub mod views;

#[cfg(test)]
pub mod test_helpers;
