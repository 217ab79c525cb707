use clap::{Args, Parser, Subcommand};
use ipmsg::{ChannelType, IpMsgClient, IpMsgConfig, IpMsgError};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ipmsg", about = "IP Messaging channel and message CLI")]
struct Cli {
    /// Override the API base URL (credentials still come from the environment).
    #[arg(long, env = "IPMSG_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Channels(ChannelsCommand),
    Messages(MessagesCommand),
}

#[derive(Args, Debug)]
struct ChannelsCommand {
    #[command(subcommand)]
    command: ChannelsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChannelsSubcommand {
    List {
        service_sid: String,
        /// Print the page metadata along with the channels.
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    Create {
        service_sid: String,
        #[arg(long = "type", default_value = "public")]
        channel_type: ChannelType,
        #[arg(long, default_value = "")]
        friendly_name: String,
        #[arg(long, default_value = "")]
        unique_name: String,
    },
    Delete {
        service_sid: String,
        channel_sid: String,
    },
}

#[derive(Args, Debug)]
struct MessagesCommand {
    #[command(subcommand)]
    command: MessagesSubcommand,
}

#[derive(Subcommand, Debug)]
enum MessagesSubcommand {
    List {
        service_sid: String,
        channel_sid: String,
        /// Print the page metadata along with the messages.
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    Send {
        service_sid: String,
        channel_sid: String,
        body: String,
        #[arg(long)]
        from: String,
        #[arg(long, default_value = "")]
        member: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), IpMsgError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    load_dotenv();

    let cli = Cli::parse();
    let mut config = IpMsgConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = ipmsg::config::normalize_base_url(&base_url);
    }
    let client = IpMsgClient::from_config(&config)?;

    match cli.command {
        Command::Channels(channels) => run_channels(&client, channels).await,
        Command::Messages(messages) => run_messages(&client, messages).await,
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }
}

async fn run_channels(client: &IpMsgClient, channels: ChannelsCommand) -> Result<(), IpMsgError> {
    match channels.command {
        ChannelsSubcommand::List { service_sid, full } => {
            let page = client.list_channels_page(&service_sid).await?;
            if full { print_json(&page) } else { print_json(&page.channels) }
        }
        ChannelsSubcommand::Create { service_sid, channel_type, friendly_name, unique_name } => {
            let sid = client
                .create_channel(&service_sid, channel_type, &friendly_name, &unique_name)
                .await?;
            print_json(&serde_json::json!({ "sid": sid }))
        }
        ChannelsSubcommand::Delete { service_sid, channel_sid } => {
            client.delete_channel(&service_sid, &channel_sid).await?;
            print_json(&serde_json::json!({ "deleted": channel_sid }))
        }
    }
}

async fn run_messages(client: &IpMsgClient, messages: MessagesCommand) -> Result<(), IpMsgError> {
    match messages.command {
        MessagesSubcommand::List { service_sid, channel_sid, full } => {
            let page = client.list_messages_page(&service_sid, &channel_sid).await?;
            if full { print_json(&page) } else { print_json(&page.messages) }
        }
        MessagesSubcommand::Send { service_sid, channel_sid, body, from, member } => {
            let message = client
                .send_message(&service_sid, &channel_sid, &member, &body, &from)
                .await?;
            print_json(&message)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), IpMsgError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| IpMsgError::Encode(e.to_string()))?;
    println!("{text}");
    Ok(())
}
