use wardcast_features::AppointmentObservation;
use wardcast_model::store::APPOINTMENT_ARTIFACT;
use wardcast_model::{
    Artifact, ArtifactMetadata, ForestConfig, SchedulingPipeline, ServiceCategory,
};
use wardcast_train::{metrics, models_dir_from_args, synth, train_test_split, TRAINING_SEED};

fn main() {
    env_logger::init();

    let dir = models_dir_from_args();
    std::fs::create_dir_all(&dir).expect("create models directory");
    log::info!("training appointment scheduling model into {}", dir.display());

    let (observations, labels) = synth::appointments(1000, TRAINING_SEED);
    let (train_idx, test_idx) = train_test_split(observations.len(), 0.2, TRAINING_SEED);

    let train_obs: Vec<AppointmentObservation> =
        train_idx.iter().map(|&i| observations[i].clone()).collect();
    let train_labels: Vec<ServiceCategory> = train_idx.iter().map(|&i| labels[i]).collect();

    let pipeline = SchedulingPipeline::fit(&train_obs, &train_labels, &ForestConfig::default())
        .expect("fit scheduling model");

    let actual: Vec<usize> = test_idx.iter().map(|&i| labels[i].index()).collect();
    let predicted: Vec<usize> = test_idx
        .iter()
        .map(|&i| pipeline.predict(&observations[i]).expect("predict").index())
        .collect();
    println!("Service-time classification:");
    println!("  accuracy: {:.3}", metrics::accuracy(&actual, &predicted));

    let path = dir.join(APPOINTMENT_ARTIFACT);
    Artifact::new(
        ArtifactMetadata::new("appointment_scheduling", "service-time category"),
        pipeline,
    )
    .save(&path)
    .expect("save artifact");
    println!("model saved to {}", path.display());
}
