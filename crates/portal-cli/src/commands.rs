use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List participants whose name contains the fragment
    Search { fragment: String },

    /// Set a PIN for the first time (select, confirm phone, choose PIN)
    Register { fragment: String },

    /// Sign in with an existing PIN
    Login { fragment: String },

    /// Show the signed-in participant, if any
    Whoami,

    /// End the local session
    Logout,
}
