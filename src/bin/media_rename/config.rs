use media_renamer::media_rename::{MediaRenameConfig, MediaRenameUserConfig};

use crate::Args;

/// Create config from given command line args and user config file.
pub fn from_args(args: Args) -> anyhow::Result<MediaRenameConfig> {
    let user_config = MediaRenameUserConfig::get_user_config()?;
    Ok(merge(args, user_config))
}

/// CLI flags take precedence over the user config.
fn merge(args: Args, user_config: MediaRenameUserConfig) -> MediaRenameConfig {
    let mut config = MediaRenameConfig::from(user_config);
    if args.non_recursive {
        config.recursive = false;
    } else if args.recursive {
        config.recursive = true;
    }
    config.debug |= args.debug;
    config.log |= args.log;
    config.print |= args.print;
    config.verbose |= args.verbose;
    config.extend_exclude(args.exclude);
    config
}
