use rand::Rng;

use crate::config::GeneralRates;
use crate::faction::Affinity;
use crate::grid::Grid;
use crate::tile::Terrain;

/// Превращает равнины в лес, горы или водоёмы по таблицам фракций
///
/// Для каждой клетки суши без объекта делаются ровно два броска:
/// первый выбирает лес/горы, второй — спонтанный водоём. Результат зависит
/// от `original_faction`, а не от текущего владельца.
pub fn classify_terrain<R: Rng + ?Sized>(grid: &mut Grid, rates: &GeneralRates, rng: &mut R) {
    for cell in 0..grid.len() {
        let tile = grid.tile(cell);
        if tile.terrain != Terrain::Ground || tile.feature.is_some() {
            continue;
        }
        let faction = tile.original_faction;

        let roll = rng.gen_range(0.0..1.0);
        if roll < rates.forest * faction.affinity(Affinity::Forest) {
            grid.set_terrain(cell, Terrain::Forest);
        } else if roll > 1.0 - rates.mountain * faction.affinity(Affinity::Mountain) {
            grid.set_terrain(cell, Terrain::Mountain);
        }

        let roll = rng.gen_range(0.0..1.0);
        if roll < faction.affinity(Affinity::Water) {
            grid.set_terrain(cell, Terrain::Ocean);
        }
    }

    derive_coastline(grid);
}

/// Океан, ортогонально граничащий с сушей, становится мелководьем
pub fn derive_coastline(grid: &mut Grid) {
    for cell in 0..grid.len() {
        if grid.terrain(cell) != Terrain::Ocean {
            continue;
        }
        let coastal = grid
            .cross(cell)
            .into_iter()
            .any(|n| grid.terrain(n).is_land());
        if coastal {
            grid.set_terrain(cell, Terrain::Water);
        }
    }
}
