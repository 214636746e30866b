pub mod fixtures {
    use crate::auth::Claims;
    use crate::models::domain::{Exchange, User};

    /// Claims for the standard test user, as the auth middleware would
    /// produce them
    pub fn test_claims() -> Claims {
        Claims {
            sub: "user-1".to_string(),
            email: "john@example.com".to_string(),
            iat: 0,
            exp: 9999999999,
        }
    }

    pub fn test_user() -> User {
        User::new("john@example.com", Some("John"))
    }

    /// A short tutoring transcript with two exchanges
    pub fn sample_exchanges() -> Vec<Exchange> {
        vec![
            Exchange::new(
                "John",
                "What is a closure?",
                "A function that captures its environment.",
            ),
            Exchange::new(
                "John",
                "And an iterator?",
                "A value that yields a sequence of items.",
            ),
        ]
    }
}
