//! Authentication commands.

use embermart_client::{ApiClient, CartStore, ClientError};

/// Log in and persist the session.
///
/// # Errors
///
/// Returns an error if credentials are rejected or the request fails.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<(), ClientError> {
    let user = api.login(email, password).await?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Create an account; the backend logs the new user in immediately.
///
/// # Errors
///
/// Returns an error if the account is rejected or the request fails.
pub async fn register(
    api: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
    phone: Option<String>,
) -> Result<(), ClientError> {
    let user = api.register(name, email, password, phone).await?;
    println!("Welcome, {}! Your account is ready.", user.name);
    Ok(())
}

/// Log out: clear the session and destroy the cart.
///
/// # Errors
///
/// Returns an error if the persisted session cannot be cleared.
pub fn logout(api: &ApiClient, cart: &mut CartStore) -> Result<(), ClientError> {
    api.logout()?;
    cart.clear();
    println!("Logged out.");
    Ok(())
}
