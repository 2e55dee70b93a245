use std::{error, fmt, io};

use twilight_embed_builder::{
    EmbedAuthorNameError, EmbedBuildError, EmbedColorError, EmbedDescriptionError, ImageSourceUrlError,
};
use twilight_gateway::cluster::ClusterStartError;
use twilight_http::request::channel::message::create_message::CreateMessageError;
use twilight_http::request::channel::message::update_message::UpdateMessageError;

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug)]
pub enum StartupError {
    NoConfig,
    InvalidConfig,
    NoLoggingSpec,
    Twilight(twilight_http::Error),
    Sqlx(sqlx::Error),
    ClusterStart(ClusterStartError),
    Io(io::Error),
    Ctrlc(ctrlc::Error),
}

impl error::Error for StartupError {}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::NoConfig => write!(f, "Unable to locate the config file"),
            StartupError::InvalidConfig => write!(f, "Unable to load the config file"),
            StartupError::NoLoggingSpec => write!(f, "Problem with the log spec file"),
            StartupError::Twilight(e) => write!(f, "Twilight error during startup, unable to continue: {}", e),
            StartupError::Sqlx(e) => write!(f, "Unable to create database pool: {:?}", e),
            StartupError::ClusterStart(e) => write!(f, "The cluster failed to start: {}", e),
            StartupError::Io(e) => write!(f, "IO error: {}", e),
            StartupError::Ctrlc(e) => write!(f, "Failed to install the shutdown handler: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum EventHandlerError {
    InvalidSession(u64),
    Database(DatabaseError),
    Twilight(twilight_http::Error),
    Message(MessageError),
}

impl error::Error for EventHandlerError {}

impl fmt::Display for EventHandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventHandlerError::InvalidSession(shard) => write!(f, "Our gateway session on shard {} died", shard),
            EventHandlerError::Database(e) => write!(f, "Database interaction failed: {}", e),
            EventHandlerError::Twilight(e) => write!(f, "Failed to interact with the discord api: {}", e),
            EventHandlerError::Message(e) => write!(f, "Message operation failed: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum MessageError {
    Create(CreateMessageError),
    Update(UpdateMessageError),
    Delivery(twilight_http::Error),
    EmbedBuild(EmbedBuildError),
    EmbedDescription(EmbedDescriptionError),
    EmbedColor(EmbedColorError),
    EmbedAuthorName(EmbedAuthorNameError),
    ImageSourceUrl(ImageSourceUrlError),
}

impl error::Error for MessageError {}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::Create(e) => write!(f, "Failed to create message: {}", e),
            MessageError::Update(e) => write!(f, "Failed to create message update: {}", e),
            MessageError::Delivery(e) => write!(f, "Failed to deliver message: {}", e),
            MessageError::EmbedBuild(e) => write!(f, "Failed to assemble embed: {}", e),
            MessageError::EmbedDescription(e) => write!(f, "Failed to set embed description: {}", e),
            MessageError::EmbedColor(e) => write!(f, "Failed to set embed color: {}", e),
            MessageError::EmbedAuthorName(e) => write!(f, "Failed to set embed author name: {}", e),
            MessageError::ImageSourceUrl(e) => write!(f, "Failed to set embed image url: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum DatabaseError {
    Sqlx(sqlx::Error),
}

impl error::Error for DatabaseError {}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::Sqlx(e) => write!(f, "Database failure: {:?}", e),
        }
    }
}

/// Every way a command invocation can fail. The last three variants are
/// internal faults and get forwarded to the guild's error log channel on top
/// of the reply the invoker already received.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    BadArgumentCount(String),
    MultipleMatches(Vec<String>),
    ObjectNotFound(String),
    ParseFailure(String),
    UnknownCommand(String),
    UnmetPrecondition(String),
    Unsuccessful(String),
    UnexpectedException(String),
    Unclassified(String),
}

impl CommandError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            CommandError::BadArgumentCount(_) => "BadArgumentCount",
            CommandError::MultipleMatches(_) => "MultipleMatches",
            CommandError::ObjectNotFound(_) => "ObjectNotFound",
            CommandError::ParseFailure(_) => "ParseFailure",
            CommandError::UnknownCommand(_) => "UnknownCommand",
            CommandError::UnmetPrecondition(_) => "UnmetPrecondition",
            CommandError::Unsuccessful(_) => "Unsuccessful",
            CommandError::UnexpectedException(_) => "UnexpectedException",
            CommandError::Unclassified(_) => "Unclassified",
        }
    }

    /// Whether this failure gets forwarded to the guild's error log channel.
    pub fn escalates(&self) -> bool {
        matches!(
            self,
            CommandError::Unsuccessful(_) | CommandError::UnexpectedException(_) | CommandError::Unclassified(_)
        )
    }

    /// The reply sent to the channel the command came from. The escalated
    /// variants stay deliberately vague, the raw reason only goes to the
    /// error log channel.
    pub fn user_notice(&self) -> String {
        match self {
            CommandError::BadArgumentCount(reason) => format!("ERROR: ``{}``", reason),
            CommandError::MultipleMatches(_) => String::from(
                "ERROR: ``Multiple commands with the same name. I don't know what command you want me to do!``",
            ),
            CommandError::ObjectNotFound(reason) => format!(
                "ERROR: ``The specified argument does not match the expected object - {}``",
                reason
            ),
            CommandError::ParseFailure(_) => {
                String::from("ERROR: ``For some reason, I am unable to parse your command.``")
            }
            CommandError::UnknownCommand(_) => {
                String::from("ERROR: ``Unknown command. Please check your spelling and try again.``")
            }
            CommandError::UnmetPrecondition(_) => String::from(
                "ERROR: ``The command may not have completed successfully as some preconditions were not met.``",
            ),
            CommandError::Unsuccessful(_) => String::from(
                "ERROR: ``For some reason, I am unable to execute that command at the moment. Try again. I have notified the administrators.``",
            ),
            CommandError::UnexpectedException(_) => String::from(
                "ERROR: ``An exception occurred when running that command. I have notified the administrators.``",
            ),
            CommandError::Unclassified(_) => String::from(
                "ERROR: ``An unknown error occurred. I have notified the administrators.``",
            ),
        }
    }
}

impl error::Error for CommandError {}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::BadArgumentCount(reason) => write!(f, "{}", reason),
            CommandError::MultipleMatches(candidates) => {
                write!(f, "multiple commands match: {}", candidates.join(", "))
            }
            CommandError::ObjectNotFound(reason) => write!(f, "{}", reason),
            CommandError::ParseFailure(reason) => write!(f, "{}", reason),
            CommandError::UnknownCommand(reason) => write!(f, "{}", reason),
            CommandError::UnmetPrecondition(reason) => write!(f, "{}", reason),
            CommandError::Unsuccessful(reason) => write!(f, "{}", reason),
            CommandError::UnexpectedException(reason) => write!(f, "{}", reason),
            CommandError::Unclassified(reason) => write!(f, "{}", reason),
        }
    }
}

impl From<io::Error> for StartupError {
    fn from(e: io::Error) -> Self {
        StartupError::Io(e)
    }
}

impl From<twilight_http::Error> for StartupError {
    fn from(e: twilight_http::Error) -> Self {
        StartupError::Twilight(e)
    }
}

impl From<sqlx::Error> for StartupError {
    fn from(e: sqlx::Error) -> Self {
        StartupError::Sqlx(e)
    }
}

impl From<ClusterStartError> for StartupError {
    fn from(e: ClusterStartError) -> Self {
        StartupError::ClusterStart(e)
    }
}

impl From<ctrlc::Error> for StartupError {
    fn from(e: ctrlc::Error) -> Self {
        StartupError::Ctrlc(e)
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(e: sqlx::Error) -> Self {
        DatabaseError::Sqlx(e)
    }
}

impl From<DatabaseError> for EventHandlerError {
    fn from(e: DatabaseError) -> Self {
        EventHandlerError::Database(e)
    }
}

impl From<twilight_http::Error> for EventHandlerError {
    fn from(e: twilight_http::Error) -> Self {
        EventHandlerError::Twilight(e)
    }
}

impl From<MessageError> for EventHandlerError {
    fn from(e: MessageError) -> Self {
        EventHandlerError::Message(e)
    }
}

impl From<twilight_http::Error> for MessageError {
    fn from(e: twilight_http::Error) -> Self {
        MessageError::Delivery(e)
    }
}

impl From<CreateMessageError> for MessageError {
    fn from(e: CreateMessageError) -> Self {
        MessageError::Create(e)
    }
}

impl From<UpdateMessageError> for MessageError {
    fn from(e: UpdateMessageError) -> Self {
        MessageError::Update(e)
    }
}

impl From<EmbedBuildError> for MessageError {
    fn from(e: EmbedBuildError) -> Self {
        MessageError::EmbedBuild(e)
    }
}

impl From<EmbedDescriptionError> for MessageError {
    fn from(e: EmbedDescriptionError) -> Self {
        MessageError::EmbedDescription(e)
    }
}

impl From<EmbedColorError> for MessageError {
    fn from(e: EmbedColorError) -> Self {
        MessageError::EmbedColor(e)
    }
}

impl From<EmbedAuthorNameError> for MessageError {
    fn from(e: EmbedAuthorNameError) -> Self {
        MessageError::EmbedAuthorName(e)
    }
}

impl From<ImageSourceUrlError> for MessageError {
    fn from(e: ImageSourceUrlError) -> Self {
        MessageError::ImageSourceUrl(e)
    }
}

// Internal failures surfacing out of a handler all funnel into the generic
// `Unsuccessful` arm; the raw cause text travels along as the reason.
impl From<DatabaseError> for CommandError {
    fn from(e: DatabaseError) -> Self {
        CommandError::Unsuccessful(e.to_string())
    }
}

impl From<twilight_http::Error> for CommandError {
    fn from(e: twilight_http::Error) -> Self {
        CommandError::Unsuccessful(e.to_string())
    }
}

impl From<MessageError> for CommandError {
    fn from(e: MessageError) -> Self {
        CommandError::Unsuccessful(e.to_string())
    }
}

impl From<CreateMessageError> for CommandError {
    fn from(e: CreateMessageError) -> Self {
        CommandError::from(MessageError::Create(e))
    }
}

impl From<EmbedBuildError> for CommandError {
    fn from(e: EmbedBuildError) -> Self {
        CommandError::from(MessageError::EmbedBuild(e))
    }
}

impl From<EmbedDescriptionError> for CommandError {
    fn from(e: EmbedDescriptionError) -> Self {
        CommandError::from(MessageError::EmbedDescription(e))
    }
}

impl From<EmbedColorError> for CommandError {
    fn from(e: EmbedColorError) -> Self {
        CommandError::from(MessageError::EmbedColor(e))
    }
}

impl From<EmbedAuthorNameError> for CommandError {
    fn from(e: EmbedAuthorNameError) -> Self {
        CommandError::from(MessageError::EmbedAuthorName(e))
    }
}

impl From<ImageSourceUrlError> for CommandError {
    fn from(e: ImageSourceUrlError) -> Self {
        CommandError::from(MessageError::ImageSourceUrl(e))
    }
}

impl From<UpdateMessageError> for CommandError {
    fn from(e: UpdateMessageError) -> Self {
        CommandError::from(MessageError::Update(e))
    }
}

#[cfg(test)]
mod tests {
    use super::CommandError;

    #[test]
    fn only_internal_faults_escalate() {
        assert!(!CommandError::BadArgumentCount(String::new()).escalates());
        assert!(!CommandError::MultipleMatches(vec![]).escalates());
        assert!(!CommandError::ObjectNotFound(String::new()).escalates());
        assert!(!CommandError::ParseFailure(String::new()).escalates());
        assert!(!CommandError::UnknownCommand(String::new()).escalates());
        assert!(!CommandError::UnmetPrecondition(String::new()).escalates());

        assert!(CommandError::Unsuccessful(String::new()).escalates());
        assert!(CommandError::UnexpectedException(String::new()).escalates());
        assert!(CommandError::Unclassified(String::new()).escalates());
    }

    #[test]
    fn unknown_command_notice_names_the_problem() {
        let notice = CommandError::UnknownCommand(String::from("no command named ``zoomies``")).user_notice();
        assert!(notice.contains("Unknown command"));
    }

    #[test]
    fn escalated_notices_stay_generic() {
        let reason = String::from("connection refused (os error 111)");

        let notice = CommandError::UnexpectedException(reason.clone()).user_notice();
        assert!(notice.contains("exception occurred"));
        assert!(!notice.contains(&reason));

        let notice = CommandError::Unsuccessful(reason.clone()).user_notice();
        assert!(notice.contains("notified the administrators"));
        assert!(!notice.contains(&reason));
    }

    #[test]
    fn reason_text_survives_the_round_trip() {
        let error = CommandError::Unsuccessful(String::from("the store is on fire"));
        assert_eq!(error.to_string(), "the store is on fire");
        assert_eq!(error.kind_name(), "Unsuccessful");
    }
}
