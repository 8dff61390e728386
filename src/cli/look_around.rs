//! Look-around command - street-level scene lookup

use clap::Args;

use crate::domain::geo::Coordinate;
use crate::AppServices;

#[derive(Args, Debug, Clone)]
pub struct LookAroundArgs {
    /// Latitude in degrees
    #[arg(allow_hyphen_values = true)]
    pub latitude: f64,

    /// Longitude in degrees
    #[arg(allow_hyphen_values = true)]
    pub longitude: f64,
}

/// Run the look-around command
pub async fn run(services: &AppServices, args: LookAroundArgs) -> anyhow::Result<()> {
    let coordinate = Coordinate::new(args.latitude, args.longitude)?;
    let scene = services.look_around.scene_for(coordinate).await?;

    println!("{}  {}", scene.identifier, scene.coordinate);
    Ok(())
}
