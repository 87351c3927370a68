#[derive(Debug, PartialEq, Eq)]
/// Error type for parsing a player on the command line.
pub enum InvalidPlayerSpec {
    EmptyName,
    MissingExecutable,
    InvalidDepth { depth: String },
    DepthForNonComputerPlayer { name: String },
}

impl std::error::Error for InvalidPlayerSpec {}

impl std::fmt::Display for InvalidPlayerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPlayerSpec::EmptyName => write!(f, "A player needs a name"),
            InvalidPlayerSpec::MissingExecutable => {
                write!(f, "A bot player needs the path of its executable after 'bot:'")
            }
            InvalidPlayerSpec::InvalidDepth { depth } => {
                write!(f, "The search depth '{}' is not a nonnegative number", depth)
            }
            InvalidPlayerSpec::DepthForNonComputerPlayer { name } => write!(
                f,
                "A search depth was given for '{}', but only players with 'Computer' in their name search",
                name
            ),
        }
    }
}
