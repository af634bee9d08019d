use wardcast_features::ResourceObservation;
use wardcast_model::store::{RESOURCE_BED_ARTIFACT, RESOURCE_STAFF_ARTIFACT};
use wardcast_model::{Artifact, ArtifactMetadata, GbmConfig, ResourcePipeline};
use wardcast_train::{metrics, models_dir_from_args, synth, train_test_split, TRAINING_SEED};

fn report(name: &str, actual: &[f64], predicted: &[f64]) {
    println!("{name}:");
    println!("  MAE:  {:.4}", metrics::mae(actual, predicted));
    println!("  RMSE: {:.4}", metrics::rmse(actual, predicted));
    println!("  R2:   {:.4}", metrics::r2(actual, predicted));
}

fn main() {
    env_logger::init();

    let dir = models_dir_from_args();
    std::fs::create_dir_all(&dir).expect("create models directory");
    log::info!("training resource models into {}", dir.display());

    let rows = synth::resources(500, TRAINING_SEED);
    let (train_idx, test_idx) = train_test_split(rows.len(), 0.2, TRAINING_SEED);

    let train_obs: Vec<ResourceObservation> = train_idx
        .iter()
        .map(|&i| rows[i].observation.clone())
        .collect();
    let train_beds: Vec<f64> = train_idx.iter().map(|&i| rows[i].bed_occupancy_rate).collect();
    let train_staff: Vec<f64> = train_idx.iter().map(|&i| rows[i].staff_needed).collect();

    let config = GbmConfig {
        n_trees: 100,
        ..GbmConfig::default()
    };
    let bed_pipeline =
        ResourcePipeline::fit(&train_obs, &train_beds, &config).expect("fit bed model");
    let staff_pipeline =
        ResourcePipeline::fit(&train_obs, &train_staff, &config).expect("fit staff model");

    let bed_actual: Vec<f64> = test_idx.iter().map(|&i| rows[i].bed_occupancy_rate).collect();
    let bed_predicted: Vec<f64> = test_idx
        .iter()
        .map(|&i| bed_pipeline.predict(&rows[i].observation).expect("predict"))
        .collect();
    report("Bed occupancy rate prediction", &bed_actual, &bed_predicted);

    let staff_actual: Vec<f64> = test_idx.iter().map(|&i| rows[i].staff_needed).collect();
    let staff_predicted: Vec<f64> = test_idx
        .iter()
        .map(|&i| staff_pipeline.predict(&rows[i].observation).expect("predict"))
        .collect();
    report("Staff requirements prediction", &staff_actual, &staff_predicted);

    let bed_path = dir.join(RESOURCE_BED_ARTIFACT);
    Artifact::new(
        ArtifactMetadata::new("resource_beds", "bed occupancy rate"),
        bed_pipeline,
    )
    .save(&bed_path)
    .expect("save bed artifact");
    println!("bed occupancy model saved to {}", bed_path.display());

    let staff_path = dir.join(RESOURCE_STAFF_ARTIFACT);
    Artifact::new(
        ArtifactMetadata::new("resource_staff", "staff needed"),
        staff_pipeline,
    )
    .save(&staff_path)
    .expect("save staff artifact");
    println!("staff requirements model saved to {}", staff_path.display());
}
