use crate::cli::ConvertArgs;
use crate::error::Result;
use charmm2amoeba::{
    core::typemap::registry::TypeMap,
    engine::error::ConversionError,
    workflows::convert::{self, StructurePair},
};
use std::path::Path;
use tracing::info;

pub async fn run(args: ConvertArgs) -> Result<()> {
    info!("Loading type map from {:?}", &args.type_map);
    let type_map = TypeMap::load(&args.type_map).map_err(ConversionError::from)?;

    let pair = StructurePair {
        name: structure_name(&args.pdb),
        coordinate_path: args.pdb,
        topology_path: args.psf,
        output_path: args.output,
    };

    let summary = tokio::task::block_in_place(|| convert::run(&pair, &type_map))?;

    println!(
        "✓ Wrote {} atoms and {} bonds to {}",
        summary.atoms,
        summary.bonds,
        pair.output_path.display()
    );
    if summary.severed_bonds > 0 || summary.ions > 0 {
        println!(
            "  {} hydrogen-hydrogen bond(s) severed, {} ion(s) charged",
            summary.severed_bonds, summary.ions
        );
    }
    Ok(())
}

fn structure_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_name_stops_at_first_dot() {
        assert_eq!(structure_name(Path::new("in/dmpc.frame2.pdb")), "dmpc");
        assert_eq!(structure_name(Path::new("popc.pdb")), "popc");
        assert_eq!(structure_name(Path::new("/")), "");
    }
}
