use super::{Body, GenerationIndex, LayoutConfig};

fn sorted_by_x(bodies: &[Body], members: &[usize]) -> Vec<usize> {
    let mut order = members.to_vec();
    order.sort_by(|&a, &b| bodies[a].x.total_cmp(&bodies[b].x));
    order
}

fn sweep(bodies: &mut [Body], members: &[usize], min_gap: f32) {
    let order = sorted_by_x(bodies, members);
    for pair in order.windows(2) {
        let [left, right] = [pair[0], pair[1]];
        let gap = bodies[right].x - bodies[left].x;
        if gap < min_gap {
            let push = (min_gap - gap) / 2.0;
            bodies[left].x -= push;
            bodies[right].x += push;
        }
    }
}

fn count_violations(bodies: &[Body], members: &[usize], min_gap: f32) -> usize {
    sorted_by_x(bodies, members)
        .windows(2)
        .filter(|pair| bodies[pair[1]].x - bodies[pair[0]].x < min_gap)
        .count()
}

fn settle(bodies: &mut [Body], members: &[usize], min_gap: f32) {
    let order = sorted_by_x(bodies, members);
    let xs = order.iter().map(|&member| bodies[member].x).collect::<Vec<_>>();
    if xs.is_empty() {
        return;
    }

    let mut forward = xs.clone();
    for i in 1..forward.len() {
        forward[i] = forward[i].max(forward[i - 1] + min_gap);
    }

    let mut backward = xs;
    for i in (0..backward.len() - 1).rev() {
        backward[i] = backward[i].min(backward[i + 1] - min_gap);
    }

    for (slot, &member) in order.iter().enumerate() {
        bodies[member].x = (forward[slot] + backward[slot]) / 2.0;
    }
}

pub(super) fn resolve_collisions(
    bodies: &mut [Body],
    index: &GenerationIndex,
    config: &LayoutConfig,
) -> usize {
    for _ in 0..config.collision_passes {
        for (_generation, members) in index.iter() {
            sweep(bodies, members, config.min_gap);
        }
    }

    let mut residual = 0;
    for (_generation, members) in index.iter() {
        let violations = count_violations(bodies, members, config.min_gap);
        if violations > 0 && config.settle {
            settle(bodies, members, config.min_gap);
        }
        residual += violations;
    }

    for body in bodies.iter_mut() {
        body.vx = 0.0;
        body.vy = 0.0;
    }

    residual
}
