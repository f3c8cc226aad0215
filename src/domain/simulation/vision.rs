use bevy::prelude::*;

use super::ai::AiController;
use super::Combatant;

/// Combatants currently inside an AI's detection circle, in the order they
/// entered it.
#[derive(Component, Debug, Default, Clone)]
pub struct Vision {
    pub visible: Vec<Entity>,
}

impl Vision {
    /// Replaces the visible set with `now_visible`, keeping the existing
    /// order for entities that stay in view. Returns the entities that left.
    pub fn refresh(&mut self, now_visible: &[Entity]) -> Vec<Entity> {
        let mut exited = Vec::new();
        self.visible.retain(|e| {
            let keep = now_visible.contains(e);
            if !keep {
                exited.push(*e);
            }
            keep
        });
        for e in now_visible {
            if !self.visible.contains(e) {
                self.visible.push(*e);
            }
        }
        exited
    }
}

/// Trigger-style vision: an entity is visible while its body overlaps the
/// detection circle. Losing sight of the current target drops the AI back
/// to Idle.
pub fn update_vision(
    combatants: Query<(Entity, &Transform, &Combatant)>,
    mut observers: Query<(Entity, &Transform, &mut Vision, &mut AiController)>,
    mut rng: ResMut<super::GameRng>,
) {
    let bodies: Vec<(Entity, Vec2, f32)> = combatants
        .iter()
        .map(|(e, t, c)| (e, t.translation.truncate(), c.radius))
        .collect();

    for (me, transform, mut vision, mut controller) in &mut observers {
        let pos = transform.translation.truncate();
        let range = controller.tuning.detection_range;
        let now_visible: Vec<Entity> = bodies
            .iter()
            .filter(|(e, p, r)| *e != me && pos.distance(*p) <= range + r)
            .map(|(e, _, _)| *e)
            .collect();

        let exited = vision.refresh(&now_visible);
        if let Some(target) = controller.target {
            if exited.contains(&target) {
                debug!("{me:?} lost sight of target {target:?}");
                controller.lose_target(&mut rng.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_reports_exits_and_keeps_order() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let c = Entity::from_raw(3);
        let mut vision = Vision::default();

        assert!(vision.refresh(&[b, a]).is_empty());
        assert_eq!(vision.visible, vec![b, a]);

        let exited = vision.refresh(&[a, c]);
        assert_eq!(exited, vec![b]);
        assert_eq!(vision.visible, vec![a, c]);
    }
}
