use blob_spammer_codec::{encode_blobs, point_evaluation};
use tracing::info;

use crate::error::SpammerResult;
use crate::types::params::ProofSettings;

/// Prints the point evaluation precompile input for one blob of a file.
#[allow(clippy::print_stdout)]
pub async fn run_proof(settings: ProofSettings) -> SpammerResult<()> {
    let ProofSettings { data, blob_index, point } = settings;
    let evaluation = tokio::task::spawn_blocking(move || {
        let blobs = encode_blobs(&data);
        point_evaluation(&blobs, blob_index, point)
    })
    .await??;

    let input = evaluation.precompile_input();
    info!(
        blob_index,
        versioned_hash = %evaluation.versioned_hash,
        x = %evaluation.point,
        y = %evaluation.claimed_value,
        commitment = %evaluation.commitment,
        proof = %evaluation.proof,
        "Computed point evaluation proof"
    );
    println!("{input}");
    Ok(())
}
