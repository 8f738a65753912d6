/// Interior views available as embeds rather than `{id}_x` images.
/// Ids here mirror `ProbeConfig::known_interior_ids`.
const INTERIOR_EMBEDS: &[(i64, &str)] = &[
    (9, r#"<iframe src="https://www.google.com/maps/embed?pb=!4v1757449828599!6m8!1m7!1sCAoSF0NJSE0wb2dLRUlDQWdJRHF5N0tadUFF!2m2!1d27.31301918268649!2d88.6045482341578!3f230.4072667429632!4f-10.457691964156524!5f0.7820865974627469" width="600" height="450" style="border:0;" allowfullscreen="" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>"#),
    (53, r#"<iframe src="https://www.google.com/maps/embed?pb=!4v1757450511611!6m8!1m7!1sCAoSFENJSE0wb2dLRUlDQWdJREp2b0VI!2m2!1d27.36903851299968!2d88.61320069409064!3f32.184572992285894!4f3.316719902511579!5f0.4000000000000002" width="600" height="450" style="border:0;" allowfullscreen="" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>"#),
    (57, r#"<iframe src="https://www.google.com/maps/embed?pb=!4v1757451176842!6m8!1m7!1sCAoSF0NJSE0wb2dLRUlDQWdJQ0d2OHItZ3dF!2m2!1d27.34783476133961!2d88.62869602800377!3f2.6003379735170427!4f9.682297601638993!5f0.7820865974627469" width="600" height="450" style="border:0;" allowfullscreen="" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>"#),
    (171, r#"<iframe src="https://www.google.com/maps/embed?pb=!4v1757452339736!6m8!1m7!1sCAoSFkNJSE0wb2dLRUlDQWdJRGg0OURqV3c.!2m2!1d27.41303405816734!2d88.58375766744783!3f179.95496974279092!4f-14.895188395082556!5f0.4000000000000002" width="600" height="450" style="border:0;" allowfullscreen="" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>"#),
    (176, r#"<iframe src="https://www.google.com/maps/embed?pb=!4v1757452457944!6m8!1m7!1sCAoSF0NJSE0wb2dLRUlDQWdJRF91ZnoteXdF!2m2!1d27.32849856209447!2d88.33547316295622!3f259.29373068943875!4f1.7535912081229554!5f0.7820865974627469" width="600" height="450" style="border:0;" allowfullscreen="" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>"#),
    (195, r#"<iframe src="https://www.google.com/maps/embed?pb=!4v1757452812776!6m8!1m7!1sCAoSF0NJSE0wb2dLRUlDQWdJQ2tzTVh5b0FF!2m2!1d27.2886859898702!2d88.56146202338051!3f75.40243916770442!4f-4.451890368389286!5f0.7820865974627469" width="600" height="450" style="border:0;" allowfullscreen="" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>"#),
    (202, r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/w2B2BE81v9A?si=1UvYi1vaOAJ1RkPs" title="YouTube video player" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe>"#),
];

pub fn interior_embed(id: i64) -> Option<&'static str> {
    INTERIOR_EMBEDS
        .iter()
        .find(|(embed_id, _)| *embed_id == id)
        .map(|(_, html)| *html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;

    #[test]
    fn every_known_interior_id_has_an_embed() {
        for id in ProbeConfig::default().known_interior_ids {
            assert!(interior_embed(id).is_some(), "missing embed for {id}");
        }
        assert!(interior_embed(42).is_none());
    }
}
