use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unresolved;

/// Login details for one server; `C` is `Unresolved` until the client lookup succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerContext<C = Client> {
    pub url: String,
    pub user: User,
    pub client: C,
}

impl ServerContext<Unresolved> {
    pub fn new(url: impl Into<String>, user: User) -> Self {
        ServerContext {
            url: url.into(),
            user,
            client: Unresolved,
        }
    }

    pub fn with_client(self, client: Client) -> ServerContext<Client> {
        ServerContext {
            url: self.url,
            user: self.user,
            client,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> User {
        User {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub secret: String,
}

impl Client {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Client {
        Client {
            id: id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
