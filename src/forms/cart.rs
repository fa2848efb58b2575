use serde::Deserialize;
use validator::Validate;

/// Maximum length accepted for a redirect target.
const RETURN_TO_MAX_LEN: u64 = 512;

/// Form payload submitted by the add/remove buttons.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CartActionForm {
    /// Local page to go back to after the command.
    #[validate(length(max = RETURN_TO_MAX_LEN))]
    pub return_to: Option<String>,
}

impl CartActionForm {
    /// Redirect target for the command, falling back to `default` for
    /// anything that is not a path on this site.
    pub fn redirect_target<'a>(&'a self, default: &'a str) -> &'a str {
        if self.validate().is_err() {
            return default;
        }

        match self.return_to.as_deref().map(str::trim) {
            Some(path) if is_local_path(path) => path,
            _ => default,
        }
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
