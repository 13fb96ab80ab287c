#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Authenticated,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn toggle(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

/// Login form state.
///
/// The password lives here only between keystrokes and submit; every submit
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub phase: LoginPhase,
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Inline status shown under the form (error or redirect reason).
    pub message: Option<String>,
}

impl AuthState {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Back to an idle form showing `message`. The username is kept.
    pub fn reset(&mut self, message: Option<String>) {
        self.phase = LoginPhase::Idle;
        self.password.clear();
        self.focus = if self.username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
        self.message = message;
    }
}
