use super::{Body, LayoutConfig};

pub(super) fn relax(bodies: &mut [Body], springs: &[(usize, usize)], config: &LayoutConfig) {
    let node_count = bodies.len();

    for _ in 0..config.iterations {
        for a in 0..node_count {
            for b in (a + 1)..node_count {
                let dx = bodies[a].x - bodies[b].x;
                let dy = bodies[a].y - bodies[b].y;
                let distance_sq = dx * dx + dy * dy;
                let mut distance = distance_sq.sqrt();
                if distance == 0.0 {
                    distance = 1.0;
                }

                if distance < config.repulsion_range && dy.abs() < config.band_tolerance {
                    let force = config.repulsion / (distance_sq + config.repulsion_softening);
                    let fx = (dx / distance) * force;
                    bodies[a].vx += fx;
                    bodies[b].vx -= fx;
                }
            }
        }

        for &(source, target) in springs {
            if source >= node_count || target >= node_count || source == target {
                continue;
            }

            let fx = (bodies[target].x - bodies[source].x) * config.spring;
            bodies[source].vx += fx;
            bodies[target].vx -= fx;
        }

        for body in bodies.iter_mut() {
            body.x += body.vx;
            body.vx *= config.damping;
            body.vy = 0.0;
            body.y = config.pinned_y(body.generation);
        }
    }
}
