//! Soil preparation: tilling and watering.

use crate::shared::*;

/// Hoe: Dirt or Grass becomes tilled soil. Anything else is left alone.
pub fn till(tile: &mut Tile) -> bool {
    match tile.kind {
        TileKind::Dirt | TileKind::Grass => {
            tile.kind = TileKind::TilledSoil;
            true
        }
        _ => false,
    }
}

/// Watering can: only freshly tilled soil takes water.
pub fn water(tile: &mut Tile) -> bool {
    if tile.kind != TileKind::TilledSoil {
        return false;
    }
    tile.kind = TileKind::WateredSoil;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hoe_tills_dirt_and_grass() {
        for kind in [TileKind::Dirt, TileKind::Grass] {
            let mut tile = Tile::new(3, 3, kind);
            assert!(till(&mut tile));
            assert_eq!(tile.kind, TileKind::TilledSoil);
        }
    }

    #[test]
    fn hoe_ignores_pebbles_and_farmed_soil() {
        for kind in TileKind::ALL {
            if matches!(kind, TileKind::Dirt | TileKind::Grass) {
                continue;
            }
            let mut tile = Tile::new(0, 0, kind);
            tile.growth_time = 0.25;
            assert!(!till(&mut tile), "hoe should not work on {:?}", kind);
            assert_eq!(tile.kind, kind);
            assert_eq!(tile.growth_time, 0.25);
        }
    }

    #[test]
    fn watering_needs_tilled_soil() {
        let mut dry = Tile::new(0, 0, TileKind::Dirt);
        assert!(!water(&mut dry));
        assert_eq!(dry.kind, TileKind::Dirt);

        let mut tilled = Tile::new(0, 0, TileKind::TilledSoil);
        assert!(water(&mut tilled));
        assert_eq!(tilled.kind, TileKind::WateredSoil);

        // Watering twice changes nothing.
        assert!(!water(&mut tilled));
        assert_eq!(tilled.kind, TileKind::WateredSoil);
    }
}
