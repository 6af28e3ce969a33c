//! Privileged override transactions
//!
//! Applies or removes one display's override in a single one-shot elevated
//! transaction. Enable stages the plist to a temporary file, then one script
//! installs it with the required ownership and permissions and flips the
//! global scaling preference; disable removes the vendor directory. Each
//! request runs under exactly one administrator prompt, stopping at the
//! first failed step.

use std::path::{Path, PathBuf};
use std::{env, fs};

use tracing::{debug, info, warn};

use crate::constants::{elevation, overrides, prefs};
use crate::descriptor::OverrideDescriptor;
use crate::display::DisplayIdentity;
use crate::elevation::{Elevator, unique_suffix};
use crate::encoding::encode;
use crate::error::HiDpiResult;
use crate::resolution::ResolutionSelection;

/// One-shot apply/remove pipeline for display overrides.
pub struct PrivilegedApplier<E: Elevator> {
    elevator: E,
    staging_dir: PathBuf,
}

impl<E: Elevator> PrivilegedApplier<E> {
    pub fn new(elevator: E) -> Self {
        Self {
            elevator,
            staging_dir: env::temp_dir(),
        }
    }

    #[cfg(test)]
    pub fn with_staging_dir(elevator: E, staging_dir: PathBuf) -> Self {
        Self {
            elevator,
            staging_dir,
        }
    }

    /// Write a HiDPI override for the display: expand the selection, encode
    /// every entry, stage the descriptor, and run the install transaction.
    ///
    /// Validation and encoding happen before anything is staged, so a
    /// malformed request never reaches the privileged stage.
    pub fn apply(
        &self,
        identity: DisplayIdentity,
        selection: &ResolutionSelection,
    ) -> HiDpiResult<()> {
        let entries = selection
            .expand()
            .into_iter()
            .map(encode)
            .collect::<HiDpiResult<Vec<_>>>()?;
        let descriptor = OverrideDescriptor::new(identity, entries);
        self.install(&descriptor)
    }

    /// Remove the display's override by deleting its vendor directory.
    ///
    /// A directory that does not exist is not an error; `rm -rf` treats it
    /// as already gone.
    pub fn remove(&self, identity: DisplayIdentity) -> HiDpiResult<()> {
        let script = format!("rm -rf \"{}\"\n", vendor_dir(identity));
        info!(display = %identity, "removing display override");
        self.elevator.run_elevated(&script)?;
        info!(display = %identity, "display override removed");
        Ok(())
    }

    fn install(&self, descriptor: &OverrideDescriptor) -> HiDpiResult<()> {
        let identity = descriptor.identity();
        let staged = self.staging_dir.join(format!(
            "{}{}-{}_{}.plist",
            elevation::STAGED_PLIST_PREFIX,
            identity.vendor_hex(),
            identity.product_hex(),
            unique_suffix()
        ));

        if let Err(err) = fs::write(&staged, descriptor.to_plist()) {
            // Drop any partially written file.
            let _ = fs::remove_file(&staged);
            return Err(err.into());
        }
        debug!(path = %staged.display(), "staged override descriptor");

        let script = install_script(identity, &staged);
        info!(display = %identity, "installing display override");
        let result = self.elevator.run_elevated(&script);

        if result.is_err() {
            // On success the script already deleted the staged file; on
            // failure it may still be around.
            if let Err(err) = fs::remove_file(&staged) {
                warn!(path = %staged.display(), error = %err, "could not remove staged descriptor");
            }
        }

        result?;
        info!(display = %identity, "display override installed");
        Ok(())
    }
}

/// The vendor-keyed directory holding this display's override.
pub fn vendor_dir(identity: DisplayIdentity) -> String {
    format!(
        "{}/{}{}",
        overrides::OVERRIDES_DIR,
        overrides::VENDOR_DIR_PREFIX,
        identity.vendor_hex()
    )
}

/// The product-keyed file the window server reads for this display.
pub fn override_file(identity: DisplayIdentity) -> String {
    format!(
        "{}/{}{}",
        vendor_dir(identity),
        overrides::PRODUCT_FILE_PREFIX,
        identity.product_hex()
    )
}

fn install_script(identity: DisplayIdentity, staged: &Path) -> String {
    let display_dir = vendor_dir(identity);
    let display_file = override_file(identity);
    let staged = staged.display();
    format!(
        "mkdir -p \"{display_dir}\"\n\
         cp \"{staged}\" \"{display_file}\"\n\
         chown {owner} \"{display_file}\"\n\
         chmod {mode} \"{display_file}\"\n\
         rm \"{staged}\"\n\
         defaults write {domain} {key} -bool YES\n",
        owner = overrides::FILE_OWNER,
        mode = overrides::FILE_MODE,
        domain = prefs::WINDOW_SERVER_DOMAIN,
        key = prefs::RESOLUTION_ENABLED_KEY,
    )
}
