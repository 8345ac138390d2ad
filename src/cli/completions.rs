use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    feedsweep completions bash > ~/.bash_completion.d/feedsweep\n\n\
                  Generate zsh completions:\n    feedsweep completions zsh > ~/.zfunc/_feedsweep\n\n\
                  Generate fish completions:\n    feedsweep completions fish > ~/.config/fish/completions/feedsweep.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
