use wardcast_features::WaitingTimeObservation;
use wardcast_model::store::PATIENT_FLOW_ARTIFACT;
use wardcast_model::{Artifact, ArtifactMetadata, GbmConfig, WaitingTimePipeline};
use wardcast_train::{metrics, models_dir_from_args, synth, train_test_split, TRAINING_SEED};

fn main() {
    env_logger::init();

    let dir = models_dir_from_args();
    std::fs::create_dir_all(&dir).expect("create models directory");
    log::info!("training patient flow model into {}", dir.display());

    let (observations, waits) = synth::patient_flow(2000, TRAINING_SEED);
    let (train_idx, test_idx) = train_test_split(observations.len(), 0.2, TRAINING_SEED);

    let train_obs: Vec<WaitingTimeObservation> =
        train_idx.iter().map(|&i| observations[i].clone()).collect();
    let train_waits: Vec<f64> = train_idx.iter().map(|&i| waits[i]).collect();

    let pipeline = WaitingTimePipeline::fit(&train_obs, &train_waits, &GbmConfig::default())
        .expect("fit waiting-time model");

    let actual: Vec<f64> = test_idx.iter().map(|&i| waits[i]).collect();
    let predicted: Vec<f64> = test_idx
        .iter()
        .map(|&i| pipeline.predict(&observations[i]).expect("predict"))
        .collect();
    println!("Waiting-time prediction:");
    println!("  MSE:  {:.2}", metrics::mse(&actual, &predicted));
    println!("  RMSE: {:.2}", metrics::rmse(&actual, &predicted));
    println!("  MAE:  {:.2}", metrics::mae(&actual, &predicted));
    println!("  R2:   {:.3}", metrics::r2(&actual, &predicted));

    let path = dir.join(PATIENT_FLOW_ARTIFACT);
    Artifact::new(
        ArtifactMetadata::new("patient_flow", "waiting time (minutes)"),
        pipeline,
    )
    .save(&path)
    .expect("save artifact");
    println!("model saved to {}", path.display());
}
