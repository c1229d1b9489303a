use clap::Args;
use tls_sig::DEFAULT_EXPIRE_SECONDS;
use tracing::info;

use crate::config::IssuerArgs;

#[derive(Debug, Args)]
pub(crate) struct UserSigArgs {
    #[command(flatten)]
    issuer: IssuerArgs,

    /// User identifier
    #[arg(long)]
    identifier: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_EXPIRE_SECONDS)]
    expire: u32,
}

pub(crate) fn execute(args: &UserSigArgs) -> Result<String, String> {
    args.issuer.check_identifier(&args.identifier)?;

    let token = args
        .issuer
        .issuer()?
        .issue_user_sig(&args.identifier, args.expire)
        .map_err(|error| format!("failed to issue user sig: {error}"))?;

    info!(identifier = %args.identifier, expire = args.expire, "issued user sig");

    Ok(token)
}
