use crate::color::{ColorId, ColoringInstance};
use crate::domain::Domains;


/**
Revision procedure (AC-3 over "not-equal" constraints).

 1. the domain of every assigned vertex is reduced to its color
 2. every arc (source, target) is scanned in a fixed order: a color c of the source is removed
    if the target cannot take any other color (its domain is {c})
 3. passes are repeated until one of them removes nothing

returns false as soon as a domain becomes empty (the partial coloring is arc-inconsistent).
The domains are left in an unspecified state in that case and should be discarded.
*/
pub fn revise(inst:&dyn ColoringInstance, coloring:&[Option<ColorId>], domains:&mut Domains) -> bool {
    for (v, color) in coloring.iter().enumerate() {
        if let Some(c) = color {
            domains.assign(v, *c);
        }
    }
    let mut stabilized = false;
    while !stabilized {
        stabilized = true;
        for (source, target) in inst.arcs() {
            if domains.is_wiped_out(*target) { return false; }
            if let Some(c) = domains.single_value(*target) {
                if domains.remove(*source, c) {
                    stabilized = false;
                }
            }
            if domains.is_wiped_out(*source) { return false; }
        }
    }
    true
}
