use std::num::NonZeroUsize;

use anyhow::ensure;
use glam::{Quat, Vec3, Vec4};
use refract::{
    cache::BoundedCache,
    label::{
        AlbedoLabel, AlphaLabel, DepthLabel, EnvironmentLabel, LightLabel, NormalLabel, RefractiveLabel,
        SpecularLabel,
    },
    types::{AlphaComponent, Capabilities, InstanceId, Light, MeshFeatures, Shadow, ShadowBasic, ShadowVariance},
    Label,
};
use refract_test::{helpers, TestRunner};

#[test]
pub fn lookups_are_idempotent() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().build()?;
    let instance = helpers::opaque(helpers::detailed_regular());

    let first = runner.labels.albedo(&instance);
    let size = runner.labels.size();
    let second = runner.labels.albedo(&instance);

    ensure!(first == second, "{:?} != {:?}", first, second);
    ensure!(runner.labels.size() == size, "Repeated lookup changed occupancy");
    Ok(())
}

#[test]
pub fn forward_regular_matches_leaves() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().build()?;
    let instances = [
        helpers::opaque(helpers::detailed_regular()),
        helpers::opaque(helpers::coloured_regular(Vec4::ONE)),
    ];

    for instance in &instances {
        let composite = runner.labels.forward_regular(instance);
        assert_eq!(composite.albedo, runner.labels.albedo(instance));
        assert_eq!(composite.emissive, runner.labels.emissive(instance));
        assert_eq!(composite.environment, runner.labels.environment(instance));
        assert_eq!(composite.normal, runner.labels.normal(instance));
        assert_eq!(composite.specular, runner.labels.specular(instance));
    }

    let detailed = runner.labels.forward_regular(&instances[0]);
    assert_eq!(detailed.albedo, AlbedoLabel::Textured);
    assert_eq!(detailed.environment, EnvironmentLabel::Reflection);
    assert_eq!(detailed.normal, NormalLabel::Mapped);
    assert_eq!(detailed.specular, SpecularLabel::Mapped);
    assert_eq!(detailed.code(), "BT_EL_NM_SM");
    Ok(())
}

#[test]
pub fn translucent_composites_match_leaves() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().build()?;

    let regular = helpers::translucent(helpers::detailed_regular(), AlphaComponent::OneMinusDot { factor: 1.5 });
    let unlit = runner.labels.forward_translucent_regular_unlit(&regular);
    assert_eq!(unlit.albedo, runner.labels.albedo(&regular));
    assert_eq!(unlit.environment, runner.labels.environment(&regular));
    assert_eq!(unlit.normal, runner.labels.normal(&regular));
    assert_eq!(unlit.alpha, runner.labels.alpha_regular(&regular));
    assert_eq!(unlit.alpha, AlphaLabel::OneMinusDot);

    let refractive = helpers::refractive();
    let label = runner.labels.forward_translucent_refractive(&refractive);
    assert_eq!(label.refractive, runner.labels.refractive(&refractive));
    assert_eq!(label.refractive, RefractiveLabel::UnmaskedNormals);
    assert_eq!(label.normal, NormalLabel::Vertex);
    assert_eq!(label.code(), "RUN_NV");

    let specular_only = helpers::specular_only(AlphaComponent::Constant(0.3));
    let label = runner.labels.forward_translucent_specular_only(&specular_only);
    assert_eq!(label.normal, runner.labels.normal(&specular_only));
    assert_eq!(label.specular, SpecularLabel::Constant);
    assert_eq!(runner.labels.alpha_specular_only(&specular_only), AlphaLabel::Constant);
    Ok(())
}

#[test]
pub fn depth_follows_albedo() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().build()?;

    let opaque = helpers::opaque(helpers::detailed_regular());
    assert_eq!(runner.labels.depth(&opaque), DepthLabel::Constant);

    let textured = helpers::opaque_alpha_depth(helpers::detailed_regular());
    assert_eq!(runner.labels.depth(&textured), DepthLabel::Mapped);

    let coloured = helpers::opaque_alpha_depth(helpers::coloured_regular(Vec4::new(1.0, 0.0, 0.0, 0.5)));
    assert_eq!(runner.labels.depth(&coloured), DepthLabel::Uniform);
    Ok(())
}

#[test]
pub fn lit_composites_pair_light_and_instance() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().capabilities(Capabilities::all()).build()?;
    let instance = helpers::opaque(helpers::detailed_regular());
    let variance: Light =
        helpers::projective(Vec3::Y, Quat::IDENTITY, Some(Shadow::Variance(ShadowVariance::default()))).into();

    let lit = runner.labels.forward_opaque_lit(&variance, &instance);
    assert_eq!(lit.light, LightLabel::ProjectiveShadowVariance);
    assert_eq!(lit.regular, runner.labels.forward_regular(&instance));
    assert_eq!(lit.code(), "LPSV_BT_EL_NM_SM");

    let spherical = helpers::spherical();
    let specular_only = helpers::specular_only(AlphaComponent::Constant(0.3));
    let lit = runner.labels.forward_translucent_specular_only_lit(&spherical, &specular_only);
    assert_eq!(lit.light, LightLabel::Spherical);
    assert_eq!(lit.code(), "LS_NV_SC_AC");

    let size = runner.labels.size();
    runner.labels.forward_opaque_lit(&variance, &instance);
    runner.labels.forward_translucent_specular_only_lit(&spherical, &specular_only);
    assert_eq!(runner.labels.size(), size);
    Ok(())
}

#[test]
pub fn light_labels_depend_on_capabilities() -> anyhow::Result<()> {
    let basic: Light = helpers::projective(Vec3::Y, Quat::IDENTITY, Some(Shadow::Basic(ShadowBasic::default()))).into();
    let variance: Light =
        helpers::projective(Vec3::Y, Quat::IDENTITY, Some(Shadow::Variance(ShadowVariance::default()))).into();

    let mut bare = TestRunner::builder().capabilities(Capabilities::empty()).build()?;
    assert_eq!(bare.labels.light(&basic), LightLabel::ProjectiveShadowBasicPacked);
    assert_eq!(bare.labels.light(&variance), LightLabel::ProjectiveShadowBasicPacked);
    assert_eq!(bare.labels.light(&helpers::directional()), LightLabel::Directional);

    let mut capable = TestRunner::builder().capabilities(Capabilities::all()).build()?;
    assert_eq!(capable.labels.light(&basic), LightLabel::ProjectiveShadowBasic);
    assert_eq!(capable.labels.light(&variance), LightLabel::ProjectiveShadowVariance);
    Ok(())
}

#[test]
pub fn new_identity_after_material_change() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().build()?;
    let instance = helpers::opaque(helpers::coloured_regular(Vec4::ONE));
    assert_eq!(runner.labels.albedo(&instance), AlbedoLabel::Coloured);

    let old_id = instance.id();
    let instance = instance.with_material(refract::types::MaterialOpaqueRegular {
        regular: helpers::detailed_regular(),
    });
    assert_ne!(instance.id(), old_id);
    assert_eq!(runner.labels.albedo(&instance), AlbedoLabel::Textured);

    runner.labels.forget_instance(old_id);
    assert_eq!(runner.labels.occupancy().albedo, 1);
    Ok(())
}

#[test]
pub fn lru_evicts_exactly_the_oldest() -> anyhow::Result<()> {
    const CAPACITY: usize = 4;

    let mut cache = BoundedCache::new("albedo", NonZeroUsize::new(CAPACITY).unwrap());
    let keys: Vec<InstanceId> = (0..=CAPACITY).map(|_| InstanceId::allocate()).collect();
    for key in &keys[..CAPACITY] {
        assert_eq!(cache.insert(*key, AlbedoLabel::Coloured), None);
    }

    // Touch the first key so the second becomes the least recently used.
    assert_eq!(cache.get(&keys[0]), Some(AlbedoLabel::Coloured));
    let evicted = cache.insert(keys[CAPACITY], AlbedoLabel::Textured);

    assert_eq!(evicted, Some((keys[1], AlbedoLabel::Coloured)));
    assert_eq!(cache.len(), CAPACITY);
    assert!(keys.iter().enumerate().all(|(idx, key)| cache.contains(key) == (idx != 1)));
    Ok(())
}

#[test]
pub fn label_cache_respects_bound() -> anyhow::Result<()> {
    const CAPACITY: usize = 3;

    let mut runner = TestRunner::builder().max_entries(CAPACITY).build()?;
    let instances: Vec<_> = (0..=CAPACITY)
        .map(|_| helpers::opaque(helpers::coloured_regular(Vec4::ONE)))
        .collect();

    for instance in &instances {
        runner.labels.forward_regular(instance);
        let occupancy = runner.labels.occupancy();
        assert!(occupancy.albedo <= CAPACITY);
        assert!(occupancy.forward_regular <= CAPACITY);
    }
    // Six caches take part in forward regular labels.
    assert_eq!(runner.labels.size(), 6 * CAPACITY);
    Ok(())
}

#[test]
pub fn zero_capacity_is_a_configuration_error() {
    let result = TestRunner::builder().max_entries(0).build();
    assert!(result.is_err());
}

#[test]
pub fn meshes_without_attributes_degrade() -> anyhow::Result<()> {
    let mut runner = TestRunner::builder().build()?;
    let instance = helpers::opaque(helpers::detailed_regular()).with_mesh(MeshFeatures::empty());

    let label = runner.labels.forward_regular(&instance);
    assert_eq!(label.albedo, AlbedoLabel::Coloured);
    assert_eq!(label.normal, NormalLabel::None);
    assert_eq!(label.specular, SpecularLabel::Constant);
    assert_eq!(label.code(), "BC_EL_SC");
    Ok(())
}
