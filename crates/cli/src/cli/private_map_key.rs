use clap::Args;
use tls_sig::{CredentialRequest, DEFAULT_EXPIRE_SECONDS, PrivilegeMap, buffer::RoomRef};
use tracing::info;

use crate::config::IssuerArgs;

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct RoomArgs {
    /// Numeric room id
    #[arg(long)]
    room_id: Option<u32>,

    /// Room name, for rooms identified by a string
    #[arg(long)]
    room_name: Option<String>,
}

impl RoomArgs {
    fn room(&self) -> Result<RoomRef, String> {
        match (self.room_id, &self.room_name) {
            (Some(room_id), None) => Ok(RoomRef::Numeric(room_id)),
            (None, Some(room_name)) => Ok(RoomRef::Named(room_name.clone())),
            _ => Err("exactly one of --room-id and --room-name is required".to_string()),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct PrivateMapKeyArgs {
    #[command(flatten)]
    issuer: IssuerArgs,

    /// User identifier
    #[arg(long)]
    identifier: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_EXPIRE_SECONDS)]
    expire: u32,

    #[command(flatten)]
    room: RoomArgs,

    /// Privilege bitmap, as a number or comma-separated names
    /// (create-room, join-room, send-audio, recv-audio, send-video, recv-video,
    /// send-screen, recv-screen, all)
    #[arg(long, default_value = "all")]
    privilege: PrivilegeMap,

    /// Account type tag written into the permission buffer
    #[arg(long, default_value_t = 0)]
    account_type: u32,
}

pub(crate) fn execute(args: &PrivateMapKeyArgs) -> Result<String, String> {
    args.issuer.check_identifier(&args.identifier)?;

    let request = CredentialRequest::private_map_key(
        args.identifier.as_str(),
        args.expire,
        args.room.room()?,
        args.privilege,
    )
    .with_account_type(args.account_type);

    let token = args
        .issuer
        .issuer()?
        .issue(&request)
        .map_err(|error| format!("failed to issue private map key: {error}"))?;

    info!(
        identifier = %args.identifier,
        expire = args.expire,
        privilege_map = args.privilege.bits(),
        "issued private map key"
    );

    Ok(token)
}
